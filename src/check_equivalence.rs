// SPDX-License-Identifier: Apache-2.0

//! Tap-stream equivalence: two designs are considered equivalent when,
//! driven by the same stimulus, every tap produces the same bit sequence on
//! every cycle. Tap identity is positional (passes preserve tap registration
//! order) with names cross-checked.

use anyhow::{bail, Result};

use crate::netlist::Design;
use crate::sim::{self, Stimulus};

pub fn check_taps_equivalent(
    original: &Design,
    transformed: &Design,
    stimulus: &[Stimulus],
) -> Result<()> {
    let orig_waves = sim::run(original, stimulus)?;
    let new_waves = sim::run(transformed, stimulus)?;
    if orig_waves.taps().len() != new_waves.taps().len() {
        bail!(
            "tap count changed: {} before, {} after",
            orig_waves.taps().len(),
            new_waves.taps().len()
        );
    }
    for ((name_a, bits_a), (name_b, bits_b)) in
        orig_waves.taps().iter().zip(new_waves.taps().iter())
    {
        if name_a != name_b {
            bail!("tap order changed: '{}' vs '{}'", name_a, name_b);
        }
        if let Some(cycle) = bits_a.iter().zip(bits_b).position(|(a, b)| a != b) {
            bail!(
                "tap '{}' diverges at cycle {}: {} before, {} after",
                name_a,
                cycle,
                bits_a[cycle],
                bits_b[cycle]
            );
        }
    }
    Ok(())
}
