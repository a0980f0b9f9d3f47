//! Error types for the topograph core library.
//!
//! Defines the error enum exposed by the public API, its stable error codes
//! and a convenient result alias.

use std::fmt;

use thiserror::Error;

use crate::{store::NodeId, topology::Topology};

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// Error type produced by graph mutation and topology generation.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum GraphError {
    /// An operation referenced a node that is not present in the store.
    #[error("node {id} is not present in the graph")]
    UnknownNode {
        /// Identifier that failed to resolve.
        id: NodeId,
    },
    /// A generation request named a topology that does not exist.
    #[error("unknown topology `{name}`")]
    UnknownTopology {
        /// Name supplied by the caller.
        name: String,
    },
    /// A generator rejected one of its parameters before touching the store.
    #[error("invalid {parameter} for {topology}: {reason}")]
    InvalidParameter {
        /// Topology whose parameters were rejected.
        topology: Topology,
        /// Parameter-bag key that failed validation.
        parameter: &'static str,
        /// Human-readable description of the constraint.
        reason: String,
    },
    /// A randomised construction with rejection exhausted its retry budget.
    #[error("{topology} construction gave up after {attempts} attempts")]
    ConstructionExhausted {
        /// Topology that could not be realised.
        topology: Topology,
        /// Number of attempts made before giving up.
        attempts: usize,
    },
}

impl GraphError {
    pub(crate) fn invalid(
        topology: Topology,
        parameter: &'static str,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidParameter {
            topology,
            parameter,
            reason: reason.into(),
        }
    }
}

define_error_codes! {
    /// Stable codes describing [`GraphError`] variants.
    enum GraphErrorCode for GraphError {
        /// An operation referenced a node that is not present in the store.
        UnknownNode => UnknownNode { .. } => "GRAPH_UNKNOWN_NODE",
        /// A generation request named a topology that does not exist.
        UnknownTopology => UnknownTopology { .. } => "GRAPH_UNKNOWN_TOPOLOGY",
        /// A generator rejected one of its parameters.
        InvalidParameter => InvalidParameter { .. } => "GRAPH_INVALID_PARAMETER",
        /// A randomised construction exhausted its retry budget.
        ConstructionExhausted => ConstructionExhausted { .. } => "GRAPH_CONSTRUCTION_EXHAUSTED",
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, GraphError>;
