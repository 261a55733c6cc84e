/// A closed enumeration whose variants are stored in `.gan` files as fixed string codes.
///
/// The codes are part of the file format and must round-trip bit-exact, so every
/// variant maps to exactly one code and unknown codes are rejected at validation.
pub trait GanCode: Sized + Copy + 'static {
    /// Human-readable name of the enumeration, used in validation messages.
    const KIND: &'static str;
    /// Every variant, in declaration order.
    const ALL: &'static [Self];

    fn code(self) -> &'static str;

    fn from_code(code: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|variant| variant.code() == code)
    }

    /// Comma separated list of accepted codes, e.g. `"1, 2, 3, 4"`.
    fn expected_codes() -> String {
        Self::ALL
            .iter()
            .map(|variant| variant.code())
            .collect::<Vec<_>>()
            .join(", ")
    }
}
