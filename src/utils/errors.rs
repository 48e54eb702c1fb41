use thiserror::Error;

/// `SimulationError` enumerates all possible errors returned by devs_queue
#[derive(Error, Debug)]
pub enum SimulationError {
    /// Represents a malformed customer schedule, rejected at load time
    #[error("Invalid schedule entry {index}: {reason}")]
    InvalidSchedule { index: usize, reason: String },

    /// Represents an operation requested on a model that does not exist
    #[error("A specified model cannot be found in the simulation")]
    ModelNotFound,

    /// Represents an operation requested on a model port that does not exist
    #[error("A specified model port cannot be found in the simulation")]
    PortNotFound,

    /// Represents an invalid model state
    #[error("An invalid model state was encountered")]
    InvalidModelState,

    /// Represents a model operation invoked out of the atomic model protocol,
    /// such as an internal transition of a passive model
    #[error("Atomic model protocol violation: {0}")]
    ProtocolViolation(String),

    /// Represents a model whose internal bookkeeping has desynchronized from
    /// the simulation clock
    #[error("Atomic model invariant violation: {0}")]
    InvariantViolation(String),

    /// Represents a failed conversion to num-traits Float
    #[error("Failed to convert to a Float value")]
    FloatConvError,

    /// Transparent serde_json errors
    #[error(transparent)]
    JSONError(#[from] serde_json::error::Error),

    /// Transparent serde_yaml errors
    #[error(transparent)]
    YAMLError(#[from] serde_yaml::Error),

    /// Transparent Exponential distribution errors
    #[error(transparent)]
    ExpError(#[from] rand_distr::ExpError),

    /// Transparent Gamma distribution errors
    #[error(transparent)]
    GammaError(#[from] rand_distr::GammaError),

    /// Transparent Normal distribution errors
    #[error(transparent)]
    NormalError(#[from] rand_distr::NormalError),

    /// Transparent Triangular distribution errors
    #[error(transparent)]
    TriangularError(#[from] rand_distr::TriangularError),

    /// Transparent Weibull distribution errors
    #[error(transparent)]
    WeibullError(#[from] rand_distr::WeibullError),
}
