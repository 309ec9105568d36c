// Wuge numeric classifiers
// Pure stroke-count arithmetic: element classification, the four grids,
// and the element-pattern derivation with its calculation trace

use crate::types::{Element, ElementPattern, FiveGrids, Grid, PatternBreakdown};

/// Classify a stroke sum into its element
///
/// Pure function of `strokes % 10`:
/// 1–2 → 木, 3–4 → 火, 5–6 → 土, 7–8 → 金, 9/0 → 水.
/// Any `u32` is valid input.
pub fn stroke_to_element(strokes: u32) -> Element {
    match strokes % 10 {
        1 | 2 => Element::Wood,
        3 | 4 => Element::Fire,
        5 | 6 => Element::Earth,
        7 | 8 => Element::Metal,
        _ => Element::Water,
    }
}

#[inline]
fn grid(value: u32) -> Grid {
    Grid {
        value,
        element: stroke_to_element(value),
    }
}

/// Derive the four grids from the three stroke counts
///
/// Heaven is `first + 1`; the total is `first + second + third` with NO +1.
/// The asymmetry is a business rule, not an oversight.
pub fn compute_five_grids(first: u32, second: u32, third: u32) -> FiveGrids {
    FiveGrids {
        heaven: grid(first + 1),
        personality: grid(first + second),
        earth: grid(second + third),
        total: grid(first + second + third),
    }
}

/// Derive the element pattern and its calculation trace
///
/// A = first + 1, B = first + second, C = second + third. C repeats the
/// earth-grid formula on purpose; the two feed different downstream fields.
pub fn compute_pattern_elements(first: u32, second: u32, third: u32) -> PatternBreakdown {
    let a = first + 1;
    let b = first + second;
    let c = second + third;

    let ea = stroke_to_element(a);
    let eb = stroke_to_element(b);
    let ec = stroke_to_element(c);

    PatternBreakdown {
        a,
        b,
        c,
        elements: ElementPattern::new(ea, eb, ec),
        calc_text: format!(
            "{first}+1={a}({ea}) · {first}+{second}={b}({eb}) · {second}+{third}={c}({ec})"
        ),
    }
}
