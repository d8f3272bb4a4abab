// Copyright 2025 the Billviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Series fill colors.

use billviz_transforms::OTHERS_KEY;
use peniko::Color;

/// Number of distinct colors before the palette repeats.
pub const PALETTE_LEN: usize = 10;

const PALETTE_RGB: [[u8; 3]; PALETTE_LEN] = [
    [0x25, 0x63, 0xeb],
    [0xdc, 0x26, 0x26],
    [0x16, 0xa3, 0x4a],
    [0xf5, 0x9e, 0x0b],
    [0x7c, 0x3a, 0xed],
    [0xdb, 0x27, 0x77],
    [0x06, 0xb6, 0xd4],
    [0xea, 0x58, 0x0c],
    [0x84, 0xcc, 0x16],
    [0x1e, 0x3a, 0x5f],
];

/// Returns the categorical fill for the series at `rank`.
///
/// Colors repeat if `rank` exceeds the palette length.
pub fn series_fill(rank: usize) -> Color {
    let [r, g, b] = PALETTE_RGB[rank % PALETTE_LEN];
    Color::from_rgba8(r, g, b, 255)
}

/// Neutral fill used by the "Others" series, regardless of its rank.
pub fn others_fill() -> Color {
    Color::from_rgba8(0x9c, 0xa3, 0xaf, 255)
}

/// Muted swatch color shown for hidden legend entries.
pub fn hidden_fill() -> Color {
    Color::from_rgba8(0xd1, 0xd5, 0xdb, 255)
}

/// Fill for a series key at `rank`.
pub fn fill_for(key: &str, rank: usize) -> Color {
    if key == OTHERS_KEY {
        others_fill()
    } else {
        series_fill(rank)
    }
}

/// Formats a color as `#rrggbb`, or `#rrggbbaa` when it is not opaque.
pub fn to_hex(color: Color) -> String {
    let rgba = color.to_rgba8();
    if rgba.a == 255 {
        format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b)
    } else {
        format!("#{:02x}{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b, rgba.a)
    }
}
