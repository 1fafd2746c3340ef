//! Small enums that parameterise the motion primitives.

/// How a movement, rotation, or scale amount is expressed.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Rate {
    /// The amount is applied as-is this tick.
    #[default]
    PerTick,
    /// The amount is per second and is divided by `ticks_per_second + 1`.
    PerSecond,
}

/// Unit of a rotation vector.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AngleUnit {
    #[default]
    Radians,
    Degrees,
}

/// Reference frame of a movement or rotation.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Space {
    #[default]
    World,
    /// Relative to the entity's own orientation.
    Local,
}

/// How `apply_scale` combines the amount with the current transform.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScaleMode {
    /// Add the amount to the local scale vector.
    #[default]
    Additive,
    /// Add `diag(amount) · orientation` into the local transform.
    Compose,
}

impl std::fmt::Display for Rate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Rate::PerTick   => "per tick",
            Rate::PerSecond => "per second",
        })
    }
}
