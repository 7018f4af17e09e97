//! Bounded list with a "show more" expansion.
//!
//! One parameterized component replaces the per-section copies for bills,
//! news, and videos: it takes the full item array, an initial cap, and an
//! item-to-markup function. Expansion state is local to the value, not a
//! process-wide variable.

/// Component-local state for a capped list.
#[derive(Debug, Clone)]
pub struct BoundedList<T> {
    items: Vec<T>,
    initial_cap: usize,
    expanded: bool,
}

impl<T> BoundedList<T> {
    pub fn new(items: Vec<T>, initial_cap: usize) -> Self {
        Self {
            items,
            initial_cap,
            expanded: false,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// The items currently shown: the capped prefix, or everything once
    /// expanded.
    pub fn visible(&self) -> &[T] {
        if self.expanded {
            &self.items
        } else {
            &self.items[..self.initial_cap.min(self.items.len())]
        }
    }

    /// Items hidden behind the expand control.
    pub fn hidden_count(&self) -> usize {
        self.items.len() - self.visible().len()
    }

    /// True while an expand control should be offered.
    pub fn has_more(&self) -> bool {
        !self.expanded && self.items.len() > self.initial_cap
    }

    /// Switches to the full list; the next render shows every item and no
    /// control.
    pub fn expand(&mut self) {
        self.expanded = true;
    }

    /// Concatenated markup for the visible items.
    pub fn render_items(&self, item_markup: impl Fn(&T) -> String) -> String {
        self.visible().iter().map(item_markup).collect()
    }

    /// Markup for the expand control, while one is needed.
    pub fn render_expand_control(&self, label: &str) -> Option<String> {
        if !self.has_more() {
            return None;
        }
        Some(format!(
            "<button class=\"list-expand w-full py-4 text-xs font-bold text-slate-400\">\
             {label} ({count}건)</button>",
            count = self.hidden_count()
        ))
    }
}
