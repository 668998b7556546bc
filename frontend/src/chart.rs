use std::f64::consts::PI;
use std::rc::Rc;

use yew::Reducible;

use crate::model::Expense;

pub const CHART_TITLE: &str = "Expenses by Category";

pub const PALETTE: [&str; 5] = [
    "rgba(255, 99, 132, 0.8)",
    "rgba(54, 162, 235, 0.8)",
    "rgba(255, 206, 86, 0.8)",
    "rgba(75, 192, 192, 0.8)",
    "rgba(153, 102, 255, 0.8)",
];

/// Radius and centre of the drawing surface, in SVG user units.
pub const RADIUS: f64 = 100.0;
pub const CENTER: f64 = 110.0;

#[derive(Clone, Debug, PartialEq)]
pub struct CategoryTotal {
    pub category: String,
    pub total: f64,
}

/// Exact, case-sensitive grouping in first-seen order.
pub fn category_totals(expenses: &[Expense]) -> Vec<CategoryTotal> {
    let mut totals: Vec<CategoryTotal> = Vec::new();
    for expense in expenses {
        match totals.iter_mut().find(|t| t.category == expense.category) {
            Some(entry) => entry.total += expense.total_amount,
            None => totals.push(CategoryTotal {
                category: expense.category.clone(),
                total: expense.total_amount,
            }),
        }
    }
    totals
}

pub fn palette_color(index: usize) -> &'static str {
    PALETTE[index % PALETTE.len()]
}

#[derive(Clone, Debug, PartialEq)]
pub enum SliceShape {
    /// Sole slice holding the whole total.
    FullCircle,
    /// SVG path data for a wedge.
    Wedge(String),
    /// Zero-valued category; listed in the legend only.
    Empty,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Slice {
    pub label: String,
    pub value: f64,
    pub color: &'static str,
    pub shape: SliceShape,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PieChart {
    pub title: &'static str,
    pub slices: Vec<Slice>,
}

impl PieChart {
    pub fn from_expenses(expenses: &[Expense]) -> Self {
        Self::from_totals(category_totals(expenses))
    }

    pub fn from_totals(totals: Vec<CategoryTotal>) -> Self {
        let grand_total: f64 = totals.iter().map(|t| t.total.max(0.0)).sum();
        let non_zero = totals.iter().filter(|t| t.total > 0.0).count();

        // angles start at 12 o'clock and run clockwise
        let mut angle = -PI / 2.0;
        let slices = totals
            .into_iter()
            .enumerate()
            .map(|(idx, t)| {
                let shape = if t.total <= 0.0 || grand_total <= 0.0 {
                    SliceShape::Empty
                } else if non_zero == 1 {
                    SliceShape::FullCircle
                } else {
                    let sweep = t.total / grand_total * 2.0 * PI;
                    let path = wedge_path(angle, angle + sweep);
                    angle += sweep;
                    SliceShape::Wedge(path)
                };
                Slice {
                    label: t.category,
                    value: t.total,
                    color: palette_color(idx),
                    shape,
                }
            })
            .collect();

        PieChart {
            title: CHART_TITLE,
            slices,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }
}

fn point_at(angle: f64) -> (f64, f64) {
    (CENTER + RADIUS * angle.cos(), CENTER + RADIUS * angle.sin())
}

fn wedge_path(start: f64, end: f64) -> String {
    let (x1, y1) = point_at(start);
    let (x2, y2) = point_at(end);
    let large_arc = if end - start > PI { 1 } else { 0 };
    format!(
        "M {c:.3} {c:.3} L {x1:.3} {y1:.3} A {r:.3} {r:.3} 0 {large_arc} 1 {x2:.3} {y2:.3} Z",
        c = CENTER,
        r = RADIUS,
    )
}

/// Holds the one chart bound to a drawing surface. Dispatching a new chart
/// swaps the slot wholesale; the previous chart goes with the old state.
#[derive(Debug, Default, PartialEq)]
pub struct ChartSlot {
    current: Option<PieChart>,
}

impl ChartSlot {
    pub fn current(&self) -> Option<&PieChart> {
        self.current.as_ref()
    }
}

impl Reducible for ChartSlot {
    type Action = PieChart;

    fn reduce(self: Rc<Self>, chart: PieChart) -> Rc<Self> {
        Rc::new(ChartSlot {
            current: Some(chart),
        })
    }
}
