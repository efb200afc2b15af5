//! Dedicated finders for hemoglobin and white blood cell count.
//! These two measurements anchor most report interpretations, so they get
//! the widest net: layout-specific regexes first, then line scans, then a
//! next-line (tabular) fallback. Every candidate must pass a plausibility
//! band before it is accepted.

use std::sync::LazyLock;

use regex::Regex;

use super::patterns;

// Plausibility bands. Hemoglobin is reported in g/dL (5-25) or g/L
// (100-200, rescaled by /10). WBC counts are in 10^3/uL or 10^9/L, same
// numeric band either way.
pub const HB_GDL_MIN: f64 = 5.0;
pub const HB_GDL_MAX: f64 = 25.0;
pub const HB_GL_MIN: f64 = 100.0;
pub const HB_GL_MAX: f64 = 200.0;
pub const WBC_MIN: f64 = 0.5;
pub const WBC_MAX: f64 = 50.0;

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| Regex::new(p).expect("valid regex"))
        .collect()
}

static HB_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[
        r"(?i)hemoglobin\s*:?\s*(\d+\.?\d*)\s*g/?d?l?",
        r"(?i)\bhb\s*:?\s*(\d+\.?\d*)\s*g/?d?l?",
        r"(?i)hgb\s*:?\s*(\d+\.?\d*)",
        r"(?i)hemoglobin[^0-9]*(\d+\.?\d*)\s*g",
        r"(?i)\bhb\b[^0-9]*(\d+\.?\d*)\s*g",
        r"(?i)hemoglobin[\s:=]+(\d+\.?\d*)",
        r"(?i)(\d+\.?\d*)\s*g/?d?l\s*hemoglobin",
        r"(?i)(\d+\.?\d*)\s*g/?d?l\s*hb",
    ])
});

/// g/L layouts are three-digit values next to a g/L unit.
static HB_GL_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[
        r"(?i)hemoglobin\s*:?\s*(\d{3}\.?\d*)\s*g/?l",
        r"(?i)\bhb\s*:?\s*(\d{3}\.?\d*)\s*g/?l",
    ])
});

static HB_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)hemoglobin|\bhb\b|hgb").expect("valid regex"));

static WBC_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[
        r"(?i)white\s*blood\s*cell\s*count\s*:?\s*(\d+\.?\d*)",
        r"(?i)white\s*blood\s*cells?\s*:?\s*(\d+\.?\d*)",
        r"(?i)wbc\s*:?\s*(\d+\.?\d*)",
        r"(?i)wbc[^0-9]*(\d+\.?\d*)",
        r"(?i)leukocytes?\s*:?\s*(\d+\.?\d*)",
        r"(?i)total\s*leukocyte\s*count\s*:?\s*(\d+\.?\d*)",
        r"(?i)\btlc\s*:?\s*(\d+\.?\d*)",
        r"(?i)(\d+\.?\d*)\s*k?/[μµ]l\s*wbc",
        r"(?i)(\d+\.?\d*)\s*k?/[μµ]l\s*white\s*blood\s*cells",
        r"(?i)(\d+\.?\d*)\s*k?/[μµ]l\s*leukocytes",
        r"(?i)(\d+\.?\d*)\s*10\^3/[μµ]l\s*wbc",
        r"(?i)(\d+\.?\d*)\s*10\^3/[μµ]l\s*white\s*cells",
        r"(?i)wbc[\s:=]+(\d+\.?\d*)",
        r"(?i)leukocytes?[\s:=]+(\d+\.?\d*)",
    ])
});

static WBC_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)wbc|white\s*blood\s*cell|leukocyte|\btlc\b").expect("valid regex")
});

/// Tabular label for the next-line fallback.
static WBC_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)wbc|white\s*blood\s*cell|leukocyte").expect("valid regex"));

// ---------------------------------------------------------------------------
// Plausibility gates
// ---------------------------------------------------------------------------

/// Normalize a candidate hemoglobin value to g/dL: values already in the
/// g/dL band pass through, values in the g/L band are rescaled by 10,
/// anything else is rejected.
pub fn normalize_hemoglobin(value: f64) -> Option<f64> {
    if (HB_GDL_MIN..=HB_GDL_MAX).contains(&value) {
        Some(value)
    } else if (HB_GL_MIN..=HB_GL_MAX).contains(&value) {
        Some(value / 10.0)
    } else {
        None
    }
}

pub fn plausible_wbc(value: f64) -> bool {
    (WBC_MIN..=WBC_MAX).contains(&value)
}

// ---------------------------------------------------------------------------
// Finders
// ---------------------------------------------------------------------------

/// Locate the hemoglobin value in report text, normalized to g/dL.
pub fn find_hemoglobin(text: &str) -> Option<f64> {
    for re in HB_PATTERNS.iter() {
        if let Some(value) = first_capture(re, text) {
            if (HB_GDL_MIN..=HB_GDL_MAX).contains(&value) {
                return Some(value);
            }
        }
    }

    for re in HB_GL_PATTERNS.iter() {
        if let Some(value) = first_capture(re, text) {
            if (HB_GL_MIN..=HB_GL_MAX).contains(&value) {
                return Some(value / 10.0);
            }
        }
    }

    // Last resort: any line mentioning hemoglobin, any plausible number on it.
    for line in text.lines() {
        if HB_LINE.is_match(line) {
            for value in patterns::numbers(line) {
                if let Some(normalized) = normalize_hemoglobin(value) {
                    return Some(normalized);
                }
            }
        }
    }

    None
}

/// Locate the white blood cell count in report text (10^3/uL).
pub fn find_wbc(text: &str) -> Option<f64> {
    for re in WBC_PATTERNS.iter() {
        if let Some(value) = first_capture(re, text) {
            if plausible_wbc(value) {
                return Some(value);
            }
        }
    }

    for line in text.lines() {
        if WBC_LINE.is_match(line) {
            for value in patterns::numbers(line) {
                if plausible_wbc(value) {
                    return Some(value);
                }
            }
        }
    }

    // Tabular layout: label on one line, value on the next.
    let lines: Vec<&str> = text.lines().collect();
    for window in lines.windows(2) {
        if WBC_LABEL.is_match(window[0]) {
            for value in patterns::numbers(window[1]) {
                if plausible_wbc(value) {
                    return Some(value);
                }
            }
        }
    }

    None
}

fn first_capture(re: &Regex, text: &str) -> Option<f64> {
    re.captures(text)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse().ok())
}
