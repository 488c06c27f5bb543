//! Emoji icons for newly created pages.

use rand::seq::IndexedRandom;

/// Objects and symbols only; no people or hands.
const PAGE_ICONS: &[&str] = &[
    "📘", "📗", "📙", "📕", "📓", "📔", "📒", "📚", "📖", "🔖", "📝", "📄", "📃", "📑", "🗂️",
    "📁", "📂", "🗃️", "🗄️", "📋", "📌", "📎", "🖇️", "📐", "📏", "🧭", "🗺️", "🧩", "🔧", "🔨",
    "🛠️", "⚙️", "🔩", "🧰", "🧪", "🔬", "🔭", "💡", "🔦", "🔑", "🗝️", "🔒", "🔓", "🧱", "🏗️",
    "🚀", "🛰️", "✈️", "🚂", "⛵", "🌍", "🌱", "🌲", "🌵", "🍀", "🌻", "🌙", "⭐", "☀️", "⚡",
    "🔥", "💧", "❄️", "🌈", "🎯", "🎲", "🧮", "💾", "💿", "🖥️", "⌨️", "🖨️", "📡", "🔋", "🔌",
    "📦", "🏷️", "✏️", "🖊️", "🖋️", "🖍️", "📊", "📈", "📉", "🗒️", "🗓️", "⏱️", "⏳", "🔔", "📣",
    "💬", "💭", "🧠", "🦉", "🐙", "🦊", "🐢", "🐝", "🦋", "🐳",
];

/// Picks a random icon for a page.
pub fn random_icon() -> &'static str {
    PAGE_ICONS.choose(&mut rand::rng()).copied().unwrap_or("📄")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn icons_come_from_the_curated_list() {
        for _ in 0..50 {
            assert!(PAGE_ICONS.contains(&random_icon()));
        }
    }
}
