// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Device status word taxonomy
//!
//! Every response carries a trailing big-endian u16 status word;
//! [`Status::Ok`] (`0x9000`) is the only success value. Classification
//! of error words is best-effort for diagnostics, devices are not
//! guaranteed to report these conditions precisely.

use num_enum::TryFromPrimitive;

/// Known device status words
#[derive(Copy, Clone, Debug, PartialEq, Eq, TryFromPrimitive, strum::Display)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[repr(u16)]
#[non_exhaustive]
pub enum Status {
    PinRemainingAttempts = 0x63c0,
    IncorrectLength = 0x6700,
    CommandIncompatibleFileStructure = 0x6981,
    SecurityStatusNotSatisfied = 0x6982,
    ConditionsOfUseNotSatisfied = 0x6985,
    IncorrectData = 0x6a80,
    NotEnoughMemorySpace = 0x6a84,
    ReferencedDataNotFound = 0x6a88,
    FileAlreadyExists = 0x6a89,
    #[strum(serialize = "INCORRECT_P1_P2")]
    IncorrectP1P2 = 0x6b00,
    InsNotSupported = 0x6d00,
    ClaNotSupported = 0x6e00,
    TechnicalProblem = 0x6f00,
    /// Command completed successfully
    Ok = 0x9000,
    MemoryProblem = 0x9240,
    NoEfSelected = 0x9400,
    InvalidOffset = 0x9402,
    FileNotFound = 0x9404,
    InconsistentFile = 0x9408,
    AlgorithmNotSupported = 0x9484,
    InvalidKcv = 0x9485,
    CodeNotInitialized = 0x9802,
    AccessConditionNotFulfilled = 0x9804,
    ContradictionSecretCodeStatus = 0x9808,
    ContradictionInvalidation = 0x9810,
    CodeBlocked = 0x9840,
    MaxValueReached = 0x9850,
    GpAuthFailed = 0x6300,
    Licensing = 0x6f42,
    Halted = 0x6faa,
}

/// Success status word as raw wire value
pub const STATUS_OK: u16 = Status::Ok as u16;
