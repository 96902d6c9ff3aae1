use super::speaker::Speaker;

/// What a script line is for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Opening,
    /// Document content; carries the chunk position
    Content(usize),
    Interjection,
    Closing,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptLine {
    pub speaker: Speaker,
    pub text: String,
    pub kind: LineKind,
}

impl ScriptLine {
    fn new(speaker: Speaker, text: impl Into<String>, kind: LineKind) -> Self {
        Self {
            speaker,
            text: text.into(),
            kind,
        }
    }
}

/// Arrange chunks into a two-host conversation.
///
/// Content alternates between hosts by chunk position. After every fourth
/// chunk the other host drops a short interjection; otherwise after every
/// seventh chunk a longer one. Nothing is interjected after the last chunk.
/// The opening and closing exchanges are always present, even with no chunks.
pub fn compose_script(chunks: &[String]) -> Vec<ScriptLine> {
    let [first, second] = Speaker::ALL;
    let mut script = Vec::with_capacity(chunks.len() + chunks.len() / 4 + 4);

    script.push(ScriptLine::new(
        first,
        "Welcome everyone! Today, we're diving into an interesting document.",
        LineKind::Opening,
    ));
    script.push(ScriptLine::new(
        second,
        format!(
            "That's right, {}. Let's see what it's all about. What's the first part you have?",
            first
        ),
        LineKind::Opening,
    ));

    for (i, chunk) in chunks.iter().enumerate() {
        let current = Speaker::at(i);
        let other = current.other();

        script.push(ScriptLine::new(current, chunk.as_str(), LineKind::Content(i)));

        if i + 1 < chunks.len() {
            if let Some(text) = interjection(i, current) {
                script.push(ScriptLine::new(other, text, LineKind::Interjection));
            }
        }
    }

    let closer = Speaker::at(chunks.len());
    script.push(ScriptLine::new(
        closer,
        "And that seems to cover the main points from the document.",
        LineKind::Closing,
    ));
    script.push(ScriptLine::new(
        closer.other(),
        format!(
            "Indeed, {}. A good overview. Thanks for joining us, listeners!",
            closer
        ),
        LineKind::Closing,
    ));

    script
}

/// The every-fourth rule wins when a position also hits the every-seventh rule
fn interjection(position: usize, current: Speaker) -> Option<String> {
    let turn = position + 1;
    if turn % 4 == 0 {
        Some(format!("Interesting point, {}. What comes next?", current))
    } else if turn % 7 == 0 {
        Some(format!(
            "Thanks for sharing that, {}. I'm curious about the following sections.",
            current
        ))
    } else {
        None
    }
}
