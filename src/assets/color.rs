use crate::foundation::error::{HypnoError, HypnoResult};

/// Straight-alpha color with channels in `0..=1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorDef {
    /// Red.
    pub r: f64,
    /// Green.
    pub g: f64,
    /// Blue.
    pub b: f64,
    /// Alpha.
    pub a: f64,
}

impl ColorDef {
    pub(crate) fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Parse a CSS color string: `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`, `rgb(..)`, `rgba(..)`.
    pub fn parse(s: &str) -> HypnoResult<Self> {
        let s = s.trim();
        if let Some(hex) = s.strip_prefix('#') {
            return parse_hex(hex)
                .map_err(|e| HypnoError::validation(format!("color \"{s}\": {e}")));
        }
        let lower = s.to_ascii_lowercase();
        if let Some(body) = lower
            .strip_prefix("rgba(")
            .or_else(|| lower.strip_prefix("rgb("))
            .and_then(|rest| rest.strip_suffix(')'))
        {
            return parse_rgb_fn(body)
                .map_err(|e| HypnoError::validation(format!("color \"{s}\": {e}")));
        }
        Err(HypnoError::validation(format!(
            "color \"{s}\" must be #hex, rgb() or rgba()"
        )))
    }

    /// Straight RGBA8, rounded.
    pub fn to_rgba8(self) -> [u8; 4] {
        fn to_u8(x: f64) -> u8 {
            (x.clamp(0.0, 1.0) * 255.0).round() as u8
        }
        [to_u8(self.r), to_u8(self.g), to_u8(self.b), to_u8(self.a)]
    }
}

fn parse_hex(s: &str) -> Result<ColorDef, String> {
    fn nibble(c: u8) -> Result<u8, String> {
        (c as char)
            .to_digit(16)
            .map(|d| d as u8)
            .ok_or_else(|| format!("invalid hex digit '{}'", c as char))
    }

    let bytes = s.as_bytes();
    let channels: Vec<u8> = match bytes.len() {
        3 | 4 => bytes
            .iter()
            .map(|&c| nibble(c).map(|n| n * 17))
            .collect::<Result<_, _>>()?,
        6 | 8 => bytes
            .chunks_exact(2)
            .map(|p| Ok(nibble(p[0])? * 16 + nibble(p[1])?))
            .collect::<Result<_, String>>()?,
        _ => return Err("hex color must have 3, 4, 6 or 8 digits".to_owned()),
    };

    let a = channels.get(3).copied().unwrap_or(255);
    Ok(ColorDef::rgba(
        f64::from(channels[0]) / 255.0,
        f64::from(channels[1]) / 255.0,
        f64::from(channels[2]) / 255.0,
        f64::from(a) / 255.0,
    ))
}

fn parse_rgb_fn(body: &str) -> Result<ColorDef, String> {
    let parts: Vec<&str> = body.split(',').map(str::trim).collect();
    if parts.len() != 3 && parts.len() != 4 {
        return Err("expected 3 or 4 components".to_owned());
    }
    let channel = |p: &str| -> Result<f64, String> {
        let v: f64 = p.parse().map_err(|_| format!("invalid component \"{p}\""))?;
        Ok((v / 255.0).clamp(0.0, 1.0))
    };
    let a = match parts.get(3) {
        Some(p) => p
            .parse::<f64>()
            .map_err(|_| format!("invalid alpha \"{p}\""))?
            .clamp(0.0, 1.0),
        None => 1.0,
    };
    Ok(ColorDef::rgba(
        channel(parts[0])?,
        channel(parts[1])?,
        channel(parts[2])?,
        a,
    ))
}
