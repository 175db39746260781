//! Mapper trait: cartridge address translation.

/// Trait for NES cartridge mappers. The bus hands every address outside the
/// RAM and PPU-register mirrors to `translate` and uses the result as the
/// index into its backing array.
pub trait Mapper {
    /// Effective address for `addr`.
    fn translate(&self, addr: u16) -> u16;
    /// Board name for diagnostics.
    fn name(&self) -> &'static str;
}
