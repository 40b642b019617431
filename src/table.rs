use rustc_hash::FxHashMap;

/// Variable table mapping identifiers to their last-assigned value.
/// Iteration and dumps follow first-assignment order, so reports stay
/// deterministic across runs.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SymbolTable {
    values: FxHashMap<String, i64>,
    order: Vec<String>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<i64> {
        self.values.get(name).copied()
    }

    /// Bind `name` to `value`, creating or overwriting.
    pub fn set(&mut self, name: &str, value: i64) {
        if self.values.insert(name.to_string(), value).is_none() {
            self.order.push(name.to_string());
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.order
            .iter()
            .map(|name| (name.as_str(), self.values[name.as_str()]))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Render the table one `name : value` line at a time, names
    /// right-justified to a minimum width.
    pub fn dump(&self) -> String {
        self.iter()
            .map(|(name, value)| format!("{name:>8} : {value}"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
