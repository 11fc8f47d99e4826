//! Macaron palette: pale fills with a slightly deeper edge per piece.

use crate::fb::Rgb;
use crate::types::PieceKind;

/// Empty well (sky-100)
pub const EMPTY: Rgb = Rgb::hex(0xe0f2fe);
/// Grid dots on the empty well
pub const GRID: Rgb = Rgb::hex(0xbae6fd);
/// Panel background (cream paper)
pub const PAPER: Rgb = Rgb::hex(0xfffdf9);
/// Panel text
pub const INK: Rgb = Rgb::hex(0x78716c);
/// Headings and overlays
pub const ACCENT: Rgb = Rgb::hex(0xfb7185);

/// Fill color of a piece
pub fn fill(kind: PieceKind) -> Rgb {
    match kind {
        PieceKind::I => Rgb::hex(0xbae6fd), // sky
        PieceKind::O => Rgb::hex(0xfef9c3), // cream
        PieceKind::T => Rgb::hex(0xddd6fe), // lavender
        PieceKind::S => Rgb::hex(0xa7f3d0), // mint
        PieceKind::Z => Rgb::hex(0xfecdd3), // berry
        PieceKind::J => Rgb::hex(0xbfdbfe), // blueberry
        PieceKind::L => Rgb::hex(0xfed7aa), // peach
    }
}

/// Edge color of a piece
pub fn edge(kind: PieceKind) -> Rgb {
    match kind {
        PieceKind::I => Rgb::hex(0x7dd3fc),
        PieceKind::O => Rgb::hex(0xfef08a),
        PieceKind::T => Rgb::hex(0xc4b5fd),
        PieceKind::S => Rgb::hex(0x6ee7b7),
        PieceKind::Z => Rgb::hex(0xfda4af),
        PieceKind::J => Rgb::hex(0x93c5fd),
        PieceKind::L => Rgb::hex(0xfdba74),
    }
}

/// Fill and edge for a render-grid cell value; `None` for empty or unknown values
pub fn for_cell(value: u8) -> Option<(Rgb, Rgb)> {
    PieceKind::from_type_id(value).map(|kind| (fill(kind), edge(kind)))
}
