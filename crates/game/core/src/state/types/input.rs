use bitflags::bitflags;

bitflags! {
    /// Normalized set of actions held down during one tick.
    ///
    /// Device polling happens elsewhere; the simulation only ever sees this set.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct InputActions: u8 {
        const LEFT       = 1 << 0;
        const RIGHT      = 1 << 1;
        const CROUCH     = 1 << 2;
        const FLASHLIGHT = 1 << 3;
        const HIGH_BEAM  = 1 << 4;
    }
}

impl InputActions {
    /// Horizontal intent: -1, 0 or 1. Opposing directions cancel.
    pub fn horizontal(&self) -> f32 {
        match (self.contains(Self::LEFT), self.contains(Self::RIGHT)) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }
}
