//! Pre-flight readiness checklist.

/// One readiness requirement the user confirms before running scripts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecklistItem {
    /// Stable identifier
    pub id: u32,

    /// Short requirement title
    pub title: &'static str,

    /// Why the requirement matters
    pub desc: &'static str,

    /// Whether the user has confirmed it
    pub checked: bool,
}

/// The fixed set of readiness items shown before generation.
#[derive(Debug, Clone)]
pub struct Checklist {
    items: Vec<ChecklistItem>,
}

impl Checklist {
    /// Creates the checklist with every item unchecked.
    pub fn new() -> Self {
        Self {
            items: vec![
                ChecklistItem {
                    id: 1,
                    title: "Revit running",
                    desc: "Have a project or family open where the script will run.",
                    checked: false,
                },
                ChecklistItem {
                    id: 2,
                    title: "pyRevit or Revit Python Shell",
                    desc: "An environment for executing Python scripts must be installed.",
                    checked: false,
                },
                ChecklistItem {
                    id: 3,
                    title: "Backup saved",
                    desc: "Always save your model before running automated scripts.",
                    checked: false,
                },
            ],
        }
    }

    /// Flips the item with `id`; returns false if no such item exists.
    pub fn toggle(&mut self, id: u32) -> bool {
        match self.items.iter_mut().find(|item| item.id == id) {
            Some(item) => {
                item.checked = !item.checked;
                true
            }
            None => false,
        }
    }

    /// Marks every item confirmed (explicit user acknowledgement).
    pub fn check_all(&mut self) {
        for item in &mut self.items {
            item.checked = true;
        }
    }

    /// Returns true once every item is confirmed.
    pub fn all_checked(&self) -> bool {
        self.items.iter().all(|item| item.checked)
    }

    /// The items, in display order.
    pub fn items(&self) -> &[ChecklistItem] {
        &self.items
    }
}

impl Default for Checklist {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_unchecked() {
        let checklist = Checklist::new();
        assert_eq!(checklist.items().len(), 3);
        assert!(!checklist.all_checked());
    }

    #[test]
    fn test_toggle() {
        let mut checklist = Checklist::new();
        assert!(checklist.toggle(1));
        assert!(checklist.items()[0].checked);
        assert!(checklist.toggle(1));
        assert!(!checklist.items()[0].checked);
        assert!(!checklist.toggle(99));
    }

    #[test]
    fn test_all_checked_after_each_toggle() {
        let mut checklist = Checklist::new();
        checklist.toggle(1);
        checklist.toggle(2);
        assert!(!checklist.all_checked());
        checklist.toggle(3);
        assert!(checklist.all_checked());
    }

    #[test]
    fn test_check_all() {
        let mut checklist = Checklist::new();
        checklist.check_all();
        assert!(checklist.all_checked());
    }
}
