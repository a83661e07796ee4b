//! Quick-start request templates.

/// A canned request that prefills the description field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Template {
    /// Short display label
    pub label: &'static str,

    /// The full request text
    pub prompt: &'static str,
}

/// The built-in templates, covering the common generative workflows.
pub fn builtin_templates() -> &'static [Template] {
    &[
        Template {
            label: "Generate neighborhood",
            prompt: "Detect the selected model lines (streets). Compute perpendicular \
                     lots every 10 meters. Insert the family \"House_Mass\" at the \
                     center of each lot and randomly place \"Simple_Tree\" in the \
                     leftover spaces.",
        },
        Template {
            label: "Scatter vegetation",
            prompt: "Select the active toposolid. Generate 50 random points on its \
                     surface and place the family \"Oak_Tree\" at each one. Apply a \
                     random rotation between 0 and 360 degrees and a scale change \
                     from 0.8 to 1.2 to every instance.",
        },
        Template {
            label: "Parametric facade",
            prompt: "On the selected wall, create a grid of panels. Insert the family \
                     \"Solar_Panel\" in every cell. Make each panel's rotation angle \
                     depend on its Z height (higher = more open).",
        },
        Template {
            label: "Smart renaming",
            prompt: "Find all views in the browser whose name contains \"PLAN\" and \
                     replace it with \"LEVEL\". Skip template views.",
        },
    ]
}
