//! Typed failures surfaced by the quoting core.
//!
//! Every fallible operation in the crate returns `Result<_, CoreError>`.
//! A failure means the quote cannot be computed from the given inputs;
//! callers should refresh their snapshots or abort, never build an
//! instruction from a partial result.

/// Errors produced by the math and quote layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    /// A product exceeded its declared bit width (64/128/256).
    #[error("multiplication overflow")]
    MultiplicationOverflow,

    /// A checked add/sub/mul outside the width-limited helpers overflowed.
    #[error("arithmetic overflow")]
    ArithmeticOverflow,

    /// A token amount does not fit in a u64.
    #[error("amount exceeds max u64")]
    AmountExceedsMaxU64,

    #[error("division by zero")]
    DivideByZero,

    /// A sqrt price is outside `[MIN_SQRT_PRICE, MAX_SQRT_PRICE]`, or a
    /// price computation left that range.
    #[error("sqrt price out of bounds")]
    SqrtPriceOutOfBounds,

    /// A tick index is outside `[MIN_TICK_INDEX, MAX_TICK_INDEX]`.
    #[error("tick index out of bounds")]
    TickIndexOutOfBounds,

    /// A tick index is not a multiple of the pool's tick spacing.
    #[error("tick index not initializable")]
    InvalidTickIndex,

    /// Position bounds are reversed or equal.
    #[error("invalid tick range")]
    InvalidTickRange,

    /// The tick array window does not cover the requested traversal:
    /// arrays are missing, non-contiguous, or the swap ran past the last
    /// supplied array.
    #[error("tick array sequence invalid")]
    TickArraySequenceInvalid,

    /// An explicit sqrt price limit is outside the global bounds.
    #[error("sqrt price limit out of bounds")]
    SqrtPriceLimitOutOfBounds,

    /// An explicit sqrt price limit is on the wrong side of the current
    /// price for the requested direction.
    #[error("invalid sqrt price limit direction")]
    InvalidSqrtPriceLimitDirection,

    /// The swap amount is zero.
    #[error("zero tradable amount")]
    ZeroTradableAmount,

    /// Liquidity to withdraw exceeds the position's current liquidity.
    #[error("liquidity exceeds position liquidity")]
    LiquidityExceedsPosition,

    /// A token mint matches neither of the pool's tokens.
    #[error("token mint does not belong to the pool")]
    InvalidTokenMint,

    /// The supplied timestamp predates the pool's last reward update.
    #[error("invalid timestamp")]
    InvalidTimestamp,

    /// No program address could be derived for the given seeds.
    #[error("unable to derive program address")]
    PdaDerivationFailed,
}
