//! Lane permutation for random and mirrored play.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use super::{Chart, ChartObject};

/// Button lane order of a plain mirror: BT and FX lanes both reversed.
pub const MIRROR_LANES: [u8; 6] = [3, 2, 1, 0, 5, 4];

const IDENTITY_LANES: [u8; 6] = [0, 1, 2, 3, 4, 5];

/// Lane mapping for a seeded shuffle.
///
/// BT lanes 0-3 and FX lanes 4-5 are shuffled separately. When the BT lanes
/// come out in their plain (or, with `mirror`, mirrored) order, the FX lanes
/// are forced so the result still differs from that order.
pub fn shuffled_lanes(seed: u64, mirror: bool) -> [u8; 6] {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut lanes = IDENTITY_LANES;
    lanes[..4].shuffle(&mut rng);
    lanes[4..].shuffle(&mut rng);

    let reference = if mirror { MIRROR_LANES } else { IDENTITY_LANES };
    if lanes[..4] == reference[..4] {
        let fx: [u8; 2] = if mirror { [4, 5] } else { [5, 4] };
        lanes[4..].copy_from_slice(&fx);
    }
    lanes
}

impl Chart {
    /// Rearrange button lanes for random and/or mirrored play.
    ///
    /// Does nothing when neither is requested. Mirroring also flips lasers.
    pub fn shuffle(&mut self, seed: u64, random: bool, mirror: bool) {
        let lanes = match (random, mirror) {
            (false, false) => return,
            (false, true) => MIRROR_LANES,
            (true, _) => shuffled_lanes(seed, mirror),
        };
        log::debug!(
            target: "chart",
            "shuffling lanes to {:?} (seed {}, mirror {})",
            lanes,
            seed,
            mirror
        );
        self.apply_shuffle(lanes, mirror);
    }

    /// Move every button on lane `i` to `lanes[i]`. With `flip_lasers` the
    /// two lasers swap sides and their positions are mirrored.
    ///
    /// Buttons on lanes outside the mapping keep their lane.
    pub fn apply_shuffle(&mut self, lanes: [u8; 6], flip_lasers: bool) {
        for object in &mut self.objects {
            match object {
                ChartObject::Single(button) => {
                    button.index = remap_lane(&lanes, button.index);
                }
                ChartObject::Hold(hold) => {
                    hold.index = remap_lane(&lanes, hold.index);
                }
                ChartObject::Laser(laser) if flip_lasers => {
                    laser.index = (laser.index % 2) ^ 1;
                    for point in &mut laser.points {
                        *point = (*point - 1.0).abs();
                    }
                }
                _ => {}
            }
        }
    }
}

fn remap_lane(lanes: &[u8; 6], index: u8) -> u8 {
    lanes.get(index as usize).copied().unwrap_or(index)
}
