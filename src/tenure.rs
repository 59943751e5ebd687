use ratatui::widgets::ListState;

#[derive(Debug, Clone, PartialEq)]
pub struct TenureOption {
    pub months: u32,
    pub label: String,
    pub selected: bool,
}

/// Builds the options `step, 2*step, ..` up to `max_months` inclusive.
///
/// Only the option equal to `default_months` is selected; if none matches,
/// nothing is.
pub fn build_tenure_options(max_months: u32, step: u32, default_months: u32) -> Vec<TenureOption> {
    if step == 0 {
        return Vec::new();
    }

    (1u32..)
        .map_while(|i| i.checked_mul(step))
        .take_while(|&m| m <= max_months)
        .map(|months| TenureOption {
            months,
            label: format!("{} months{}", months, year_annotation(months)),
            selected: months == default_months,
        })
        .collect()
}

fn year_annotation(months: u32) -> String {
    let years = months as f64 / 12.0;
    if years < 1.0 {
        return String::new();
    }

    let shown = if years.fract() == 0.0 {
        format!("{:.0}", years)
    } else {
        format!("{:.1}", (years * 10.0).round() / 10.0)
    };
    let plural = if years > 1.0 { "s" } else { "" };
    format!(" ({} year{})", shown, plural)
}

/// Selection widget state for the tenure list.
#[derive(Debug, Default)]
pub struct TenureSelect {
    pub options: Vec<TenureOption>,
    pub state: ListState,
}

impl TenureSelect {
    /// Replaces whatever the widget held before.
    pub fn populate(&mut self, max_months: u32, step: u32, default_months: u32) {
        self.options = build_tenure_options(max_months, step, default_months);
        let selected = self.options.iter().position(|o| o.selected);
        self.state = ListState::default();
        self.state.select(selected);
    }

    pub fn selected_months(&self) -> Option<u32> {
        self.state
            .selected()
            .and_then(|i| self.options.get(i))
            .map(|o| o.months)
    }

    /// Returns true if the selection moved.
    pub fn select_next(&mut self) -> bool {
        if self.options.is_empty() {
            return false;
        }
        let next = match self.state.selected() {
            Some(i) if i + 1 < self.options.len() => i + 1,
            Some(_) => return false,
            None => 0,
        };
        self.select(next);
        true
    }

    pub fn select_previous(&mut self) -> bool {
        if self.options.is_empty() {
            return false;
        }
        let prev = match self.state.selected() {
            Some(0) => return false,
            Some(i) => i - 1,
            None => 0,
        };
        self.select(prev);
        true
    }

    fn select(&mut self, index: usize) {
        for (i, option) in self.options.iter_mut().enumerate() {
            option.selected = i == index;
        }
        self.state.select(Some(index));
    }
}
