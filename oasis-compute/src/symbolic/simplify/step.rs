use std::fmt;

/// A single rewrite applied during simplification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// `a+(b+c) = a+b+c`, `a*(b*c) = a*b*c`
    Flatten,

    /// `2+3 = 5`, `2*3 = 6`
    FoldNumbers,

    /// `a+0 = a`
    AddZero,

    /// `2a+3a = 5a`
    CombineLikeTerms,

    /// `0*a = 0`
    MultiplyZero,

    /// `1*a = a`
    MultiplyOne,

    /// `a^b*a^c = a^(b+c)`
    CombineLikeFactors,

    /// `a(b+c) = ab+ac`
    Distribute,

    /// `a^0 = 1`
    PowerZero,

    /// `a^1 = a`
    PowerOne,

    /// `0^n = 0`
    ZeroBase,

    /// `1^n = 1`
    OneBase,

    /// `2^3 = 8`, `(4/9)^(1/2) = 2/3`
    EvaluatePower,

    /// `2^(3/2) = 2*2^(1/2)`
    SplitPower,

    /// `(a^b)^n = a^(bn)`
    PowerOfPower,

    /// `(ab)^n = a^n*b^n`
    PowerOfProduct,

    /// `(a+b)^2 = (a+b)(a+b)`
    ExpandPower,

    /// `dd(f, x)`
    Derivative,

    /// `in(f, x)`
    Integral,

    /// `log(b, a)`, `ln(a)`
    Logarithm,

    /// `sqrt(a) = a^(1/2)`
    SquareRoot,

    /// `sin(0) = 0`, `cos(0) = 1`, `tan(0) = 0`
    Trigonometry,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let description = match self {
            Self::Flatten => "flatten nested sums and products",
            Self::FoldNumbers => "evaluate numeric terms",
            Self::AddZero => "remove zero terms",
            Self::CombineLikeTerms => "combine like terms",
            Self::MultiplyZero => "multiply by zero",
            Self::MultiplyOne => "remove factors of one",
            Self::CombineLikeFactors => "combine like factors",
            Self::Distribute => "distribute multiplication over addition",
            Self::PowerZero => "raise to the power of zero",
            Self::PowerOne => "raise to the power of one",
            Self::ZeroBase => "raise zero to a power",
            Self::OneBase => "raise one to a power",
            Self::EvaluatePower => "evaluate numeric power",
            Self::SplitPower => "split integer part of a fractional power",
            Self::PowerOfPower => "multiply nested exponents",
            Self::PowerOfProduct => "distribute power over a product",
            Self::ExpandPower => "expand power of a sum",
            Self::Derivative => "differentiate",
            Self::Integral => "integrate",
            Self::Logarithm => "evaluate logarithm",
            Self::SquareRoot => "rewrite square root as a power",
            Self::Trigonometry => "evaluate trigonometric function",
        };
        write!(f, "{}", description)
    }
}
