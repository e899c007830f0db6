/// Plain-vanilla option side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionType {
    /// Call option payoff profile.
    Call,
    /// Put option payoff profile.
    Put,
}

impl OptionType {
    /// Returns +1.0 for calls and -1.0 for puts.
    #[inline]
    pub fn sign(self) -> f64 {
        match self {
            Self::Call => 1.0,
            Self::Put => -1.0,
        }
    }

    /// Vanilla intrinsic payoff against a strike.
    #[inline]
    pub fn payoff(self, spot: f64, strike: f64) -> f64 {
        match self {
            Self::Call => (spot - strike).max(0.0),
            Self::Put => (strike - spot).max(0.0),
        }
    }
}

/// Barrier contract style: crossing direction combined with knock behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarrierKind {
    /// Activates when spot moves downward through the barrier.
    DownIn,
    /// Deactivates when spot moves downward through the barrier.
    DownOut,
    /// Activates when spot moves upward through the barrier.
    UpIn,
    /// Deactivates when spot moves upward through the barrier.
    UpOut,
}

impl BarrierKind {
    /// True for up-and-in / up-and-out styles.
    #[inline]
    pub fn is_up(self) -> bool {
        matches!(self, Self::UpIn | Self::UpOut)
    }

    /// True for knock-in styles.
    #[inline]
    pub fn is_knock_in(self) -> bool {
        matches!(self, Self::DownIn | Self::UpIn)
    }
}

/// Strike convention for lookback options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookbackStrike {
    /// Strike set by the realized extreme (buy at the min, sell at the max).
    Floating,
    /// Fixed strike compared against the realized extreme.
    Fixed,
}

/// Settlement convention for digital (binary) options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DigitalPayout {
    /// Pays a fixed cash amount when in the money at expiry.
    Cash,
    /// Pays the asset value when in the money at expiry.
    Asset,
}

/// Stochastic model bound to a simulation context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModelKind {
    /// Geometric Brownian motion.
    #[default]
    Gbm,
    /// Heston stochastic variance.
    Heston,
    /// SABR stochastic volatility.
    Sabr,
}

/// Averaging method for Asian options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Averaging {
    /// Arithmetic mean of the observations.
    Arithmetic,
    /// Geometric mean of the observations.
    Geometric,
}

/// Strike convention for Asian options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrikeKind {
    /// Average settles against a fixed strike.
    Fixed,
    /// Terminal spot settles against the average.
    Floating,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payoff_is_intrinsic() {
        assert_eq!(OptionType::Call.payoff(110.0, 100.0), 10.0);
        assert_eq!(OptionType::Call.payoff(90.0, 100.0), 0.0);
        assert_eq!(OptionType::Put.payoff(90.0, 100.0), 10.0);
        assert_eq!(OptionType::Put.payoff(110.0, 100.0), 0.0);
    }

    #[test]
    fn barrier_kind_classification() {
        assert!(BarrierKind::UpIn.is_up());
        assert!(BarrierKind::UpOut.is_up());
        assert!(!BarrierKind::DownIn.is_up());
        assert!(BarrierKind::DownIn.is_knock_in());
        assert!(BarrierKind::UpIn.is_knock_in());
        assert!(!BarrierKind::DownOut.is_knock_in());
    }

    #[test]
    fn sign_convention() {
        assert_eq!(OptionType::Call.sign(), 1.0);
        assert_eq!(OptionType::Put.sign(), -1.0);
    }
}
