//! Packed ARGB colors

/// 8-bit-per-channel color, packed as `0xAARRGGBB`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color(u32);

impl Color {
    pub const WHITE: Color = Color::rgb(0xFF, 0xFF, 0xFF);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const RED: Color = Color::rgb(0xFF, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 0xFF, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 0xFF);
    pub const YELLOW: Color = Color::rgb(0xFF, 0xFF, 0);
    pub const CYAN: Color = Color::rgb(0, 0xFF, 0xFF);
    pub const MAGENTA: Color = Color::rgb(0xFF, 0, 0xFF);
    pub const GRAY: Color = Color::rgb(0x80, 0x80, 0x80);
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 0xFF)
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self(((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }

    /// Opaque color from `0xRRGGBB`
    pub const fn from_hex(hex: u32) -> Self {
        Self(0xFF00_0000 | (hex & 0x00FF_FFFF))
    }

    pub const fn from_argb(argb: u32) -> Self {
        Self(argb)
    }

    pub const fn to_argb(self) -> u32 {
        self.0
    }

    /// `0x00RRGGBB`, the layout software presenters expect
    pub const fn to_xrgb(self) -> u32 {
        self.0 & 0x00FF_FFFF
    }

    pub const fn r(self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub const fn g(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub const fn b(self) -> u8 {
        self.0 as u8
    }

    pub const fn a(self) -> u8 {
        (self.0 >> 24) as u8
    }

    pub const fn with_alpha(self, alpha: u8) -> Self {
        Self::rgba(self.r(), self.g(), self.b(), alpha)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_packing() {
        let color = Color::rgba(0x12, 0x34, 0x56, 0x78);
        assert_eq!(color.to_argb(), 0x7812_3456);
        assert_eq!((color.r(), color.g(), color.b(), color.a()), (0x12, 0x34, 0x56, 0x78));
        assert_eq!(color.to_xrgb(), 0x0012_3456);
    }

    #[test]
    fn test_from_hex_is_opaque() {
        assert_eq!(Color::from_hex(0xFF0000), Color::RED);
        assert_eq!(Color::from_hex(0x00FF00).a(), 0xFF);
    }
}
