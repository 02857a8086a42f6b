use serde::Serialize;

/// RGBA color of a feature style. Serialized as a hex string.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub struct Color {
    r: u8,
    g: u8,
    b: u8,
    a: u8,
}

impl From<Color> for String {
    fn from(value: Color) -> Self {
        value.to_hex()
    }
}

impl Color {
    /// `#000000`
    pub const BLACK: Color = Color::rgba(0, 0, 0, 255);

    /// Color with the given channels.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Color from a `#rrggbb` literal, usable in constants.
    ///
    /// # Panics
    ///
    /// Panics if the literal is not `#` followed by six hex digits.
    pub const fn from_hex(hex: &'static str) -> Self {
        let bytes = hex.as_bytes();
        if bytes.len() != 7 || bytes[0] != b'#' {
            panic!("color literal must look like #rrggbb");
        }

        Self::rgba(
            hex_pair(bytes[1], bytes[2]),
            hex_pair(bytes[3], bytes[4]),
            hex_pair(bytes[5], bytes[6]),
            255,
        )
    }

    /// Lowercase `#rrggbb` for opaque colors, `#rrggbbaa` otherwise.
    pub fn to_hex(&self) -> String {
        let Self { r, g, b, a } = *self;
        match a {
            255 => format!("#{r:02x}{g:02x}{b:02x}"),
            _ => format!("#{r:02x}{g:02x}{b:02x}{a:02x}"),
        }
    }
}

const fn hex_pair(high: u8, low: u8) -> u8 {
    hex_digit(high) * 16 + hex_digit(low)
}

const fn hex_digit(c: u8) -> u8 {
    match c {
        b'0'..=b'9' => c - b'0',
        b'a'..=b'f' => c - b'a' + 10,
        b'A'..=b'F' => c - b'A' + 10,
        _ => panic!("not a hex digit"),
    }
}
