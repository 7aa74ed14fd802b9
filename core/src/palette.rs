pub const NETWORK_COLORS: &[&str] = &[
    "rgba(59, 130, 246, 0.9)",
    "rgba(14, 165, 233, 0.9)",
    "rgba(6, 182, 212, 0.9)",
    "rgba(16, 185, 129, 0.9)",
    "rgba(139, 92, 246, 0.9)",
];

pub const MATRIX_COLORS: &[(u8, u8, u8)] = &[
    (59, 130, 246),
    (14, 165, 233),
    (6, 182, 212),
    (16, 185, 129),
];

pub const MATRIX_GLYPHS: &str =
    "01アイウエオカキクケコサシスセソタチツテトナニヌネノハヒフヘホマミムメモヤユヨラリルレロワヲン";

pub const RAIN_GLYPHS: &[char] = &['0', '1', 'ア', 'カ', 'サ', 'タ', '二', '三'];

pub fn rgba((r, g, b): (u8, u8, u8), alpha: f64) -> String {
    format!("rgba({r}, {g}, {b}, {alpha:.3})")
}
