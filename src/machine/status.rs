//! Appliance status bitmask and the state object that owns it.

use core::fmt;

/// One monitored appliance capability and its bit in the status byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Capability {
    /// Appliance is switched on.
    Power = 0b0000_0001,
    /// Water tank holds water.
    Water = 0b0000_0010,
    /// Bean hopper holds beans.
    Beans = 0b0000_0100,
    /// Drip tray is in place.
    Tray = 0b0000_1000,
}

impl Capability {
    pub const ALL: [Capability; 4] = [Self::Power, Self::Water, Self::Beans, Self::Tray];

    /// Return the bitmask for this capability.
    pub const fn mask(self) -> u8 {
        self as u8
    }
}

/// Bit-per-capability status byte. Reserved bits are ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusBitmask(u8);

impl StatusBitmask {
    const KNOWN: u8 = 0b0000_1111;

    pub const fn empty() -> Self {
        Self(0)
    }

    pub const fn from_bits(bits: u8) -> Self {
        Self(bits & Self::KNOWN)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn contains(self, cap: Capability) -> bool {
        self.0 & cap.mask() != 0
    }

    pub fn set(&mut self, cap: Capability, on: bool) {
        if on {
            self.0 |= cap.mask();
        } else {
            self.0 &= !cap.mask();
        }
    }

    #[must_use]
    pub fn with(mut self, cap: Capability, on: bool) -> Self {
        self.set(cap, on);
        self
    }
}

impl fmt::Display for StatusBitmask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flag = |cap| if self.contains(cap) { "OK" } else { "N.A." };
        write!(
            f,
            "power={} water={} beans={} tray={}",
            flag(Capability::Power),
            flag(Capability::Water),
            flag(Capability::Beans),
            flag(Capability::Tray),
        )
    }
}

/// Live appliance state: the debounced status byte plus the sticky power flag.
///
/// Single owner, lives for the whole process, starts empty on every boot.
#[derive(Debug, Clone, Default)]
pub struct ApplianceState {
    status: StatusBitmask,
    power: bool,
}

impl ApplianceState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> StatusBitmask {
        self.status
    }

    /// Last explicitly set power state.
    pub fn power(&self) -> bool {
        self.power
    }

    /// Set the sticky power flag. Takes effect on the next status refresh.
    pub fn set_power(&mut self, on: bool) {
        self.power = on;
    }

    pub(crate) fn set_status(&mut self, status: StatusBitmask) {
        self.status = status;
    }
}
