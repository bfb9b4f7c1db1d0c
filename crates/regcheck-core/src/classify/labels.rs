//! Label classifier: maps pull request labels to an [`ExtensionType`]

use crate::types::ExtensionType;

/// Return the type of the first label that names an extension type.
///
/// Labels with no mapping (e.g. `Publish`) are skipped. An empty label set
/// yields `None`; that is the "unrelated pull request" signal, not an error.
pub fn classify_labels<I, S>(labels: I) -> Option<ExtensionType>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    labels
        .into_iter()
        .find_map(|label| ExtensionType::from_label(label.as_ref()))
}
