//! Prompt construction for script generation, repair and advice.
//!
//! One system instruction is shared by generation and fixing so the two
//! flows produce scripts with the same conventions (transactions, units,
//! output shape).

/// System instruction shared by [`generation_prompt`] and [`fix_prompt`].
pub const SYSTEM_INSTRUCTION: &str = r#"You are an expert Revit API developer and Python scripting specialist for pyRevit.
Your goal is to translate the user's natural-language requests into Python code that is ready to copy, paste and run inside Revit.

CRITICAL CODE GENERATION RULES:

1. ENVIRONMENT:
   - The code runs in pyRevit or Revit Python Shell.
   - Assume the globals `doc` (Document) and `uidoc` (UIDocument) ALREADY EXIST. Do not create them.
   - Always use: `from Autodesk.Revit.DB import *`

2. TRANSACTIONS:
   - ANY change to the model (creating walls, moving elements, changing parameters) MUST happen inside a transaction.
   - Structure:
     t = Transaction(doc, "Describe the action")
     t.Start()
     # ... your code here ...
     t.Commit()

3. UNITS (VERY IMPORTANT):
   - Revit works in FEET internally.
   - If the user asks for meters, you MUST convert the measurement.
   - Example: for 3 meters, use `3 / 0.3048` or a small helper function.
   - Prefer plain arithmetic conversion over UnitUtils classes unless strictly necessary, for compatibility across Revit versions.

4. GEOMETRY:
   - Use `XYZ(x, y, z)` for coordinates.
   - Use `Line.CreateBound(p1, p2)` for lines.
   - Rotations are in radians.

5. OUTPUT:
   - No long theoretical explanations.
   - Deliver the code inside a markdown code block.
   - Add brief comments in the code explaining what each block does.

EXPECTED STYLE EXAMPLE:

```python
# Example: create a level
from Autodesk.Revit.DB import *
# doc = __revit__.ActiveUIDocument.Document

t = Transaction(doc, "Create Level")
t.Start()
try:
    # Always use Create for levels on current Revit versions
    Level.Create(doc, 10.0)
    t.Commit()
except Exception as e:
    t.RollBack()
    print("Error:", e)
```

Use it as a guide for transaction structure and imports."#;

/// Builds the prompt for first-time script generation.
pub fn generation_prompt(description: &str) -> String {
    format!(
        "Generate a Python script for Revit that fulfils the following user request:\n\
         \n\
         \"{description}\"\n\
         \n\
         Make sure to import the required libraries, wrap model changes in a \
         transaction, and use the pre-existing doc/uidoc globals."
    )
}

/// Builds the repair prompt: original code plus the error Revit reported.
pub fn fix_prompt(original_code: &str, error_message: &str) -> String {
    format!(
        "The following Revit Python script raised an error when it ran.\n\
         \n\
         ORIGINAL CODE:\n\
         {original_code}\n\
         \n\
         ERROR REPORTED BY REVIT/PYREVIT:\n\
         {error_message}\n\
         \n\
         TASK:\n\
         1. Analyse the root cause (e.g. indentation, incorrect API usage, data \
         types, units, or a missing active transaction).\n\
         2. Correct the code applying Revit API best practices.\n\
         3. Return ONLY the corrected version of the code, ready to copy and paste."
    )
}

/// Builds the free-form consulting prompt.
pub fn advice_prompt(question: &str) -> String {
    format!(
        "You are an expert BIM consultant for the Revit API and Python \
         (pyRevit/Dynamo). The user has a technical question.\n\
         Question: \"{question}\"\n\
         Answer concisely and helpfully. Two paragraphs at most."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_prompt_embeds_description() {
        let prompt = generation_prompt("create 3 levels every 3 meters");
        assert!(prompt.contains("\"create 3 levels every 3 meters\""));
        assert!(prompt.contains("doc/uidoc"));
    }

    #[test]
    fn test_fix_prompt_carries_code_and_error() {
        let prompt = fix_prompt("t.Start()", "InvalidOperationException");
        assert!(prompt.contains("t.Start()"));
        assert!(prompt.contains("InvalidOperationException"));
        assert!(prompt.contains("ONLY the corrected version"));
    }

    #[test]
    fn test_advice_prompt_quotes_question() {
        let prompt = advice_prompt("when do I need SubTransaction?");
        assert!(prompt.contains("\"when do I need SubTransaction?\""));
    }

    #[test]
    fn test_system_instruction_mentions_core_rules() {
        assert!(SYSTEM_INSTRUCTION.contains("Transaction(doc"));
        assert!(SYSTEM_INSTRUCTION.contains("0.3048"));
        assert!(SYSTEM_INSTRUCTION.contains("from Autodesk.Revit.DB import *"));
    }
}
