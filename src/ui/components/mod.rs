pub mod flashcard;
pub mod home;
pub mod loading;
pub mod topic_list;
pub mod vocab_list;
pub mod word_detail;

/// Flattens a rendered buffer to text, one line per row.
#[cfg(test)]
pub fn buffer_text(buf: &ratatui::buffer::Buffer) -> String {
    let area = buf.area;
    (area.top()..area.bottom())
        .map(|y| {
            (area.left()..area.right())
                .map(|x| buf[(x, y)].symbol().to_string())
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}
