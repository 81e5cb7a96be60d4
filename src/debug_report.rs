use tagscript::{Compiled, Diagnostic, EmbedPayload, MessagePayload};

mod ansi {
    pub const RESET: &str = "\x1b[0m";
    pub const DIM: &str = "\x1b[2m";
    pub const BOLD: &str = "\x1b[1m";

    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";

    pub struct Palette {
        enabled: bool,
    }

    impl Palette {
        pub fn new(enabled: bool) -> Self {
            Self { enabled }
        }

        pub fn paint(&self, s: impl AsRef<str>, color: &str) -> String {
            if self.enabled { format!("{}{}{}", color, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn bold(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", BOLD, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn dim(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", DIM, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }
    }
}

pub fn print_run(input: &str, compiled: &Compiled, diagnostics: &[Diagnostic], color: bool) {
    let palette = ansi::Palette::new(color);
    println!("\n{}", palette.bold(palette.paint(format!("⚙  Compiling: \"{}\"", input.trim()), ansi::CYAN)));
    println!("  {} {}", palette.dim("type:"), palette.paint(compiled.kind.describe(true, false), ansi::BLUE));

    if compiled.payload.is_empty() {
        println!("\n{}", palette.paint("Nothing to send: the message is empty.", ansi::YELLOW));
    }

    println!("\n{}", palette.paint("━━━ Content ━━━", ansi::GRAY));
    print_content(&compiled.payload, &palette);

    println!("\n{}", palette.paint("━━━ Embeds ━━━", ansi::GRAY));
    if compiled.payload.embeds.is_empty() {
        println!("{}", palette.dim("  No embeds produced"));
    }
    for (idx, embed) in compiled.payload.embeds.iter().enumerate() {
        print_embed(idx, embed, &palette);
    }

    if !compiled.payload.buttons.is_empty() {
        println!("\n{}", palette.paint("━━━ Buttons ━━━", ansi::GRAY));
        for (idx, button) in compiled.payload.buttons.iter().enumerate() {
            println!(
                "  {} {} {} {}",
                palette.paint(format!("[{}]", idx), ansi::GRAY),
                palette.paint(&button.url, ansi::CYAN),
                palette.dim("│"),
                palette.dim(format!(
                    "label: {}  emoji: {}",
                    button.label.as_deref().unwrap_or("-"),
                    button.emoji.as_deref().unwrap_or("-")
                )),
            );
        }
    }

    if !diagnostics.is_empty() {
        println!("\n{}", palette.paint("━━━ Registry ━━━", ansi::GRAY));
        for diagnostic in diagnostics {
            println!("  {} {}", palette.paint("!", ansi::YELLOW), palette.dim(diagnostic.to_string()));
        }
    }

    let metrics = &compiled.metrics;
    println!("\n{}", palette.paint("━━━ Timing ━━━", ansi::GRAY));
    println!(
        "  Total: {}  │  Variables: {}  │  Content: {}  │  Embeds: {}",
        palette.paint(format!("{:?}", metrics.total), ansi::GREEN),
        palette.dim(format!("{:?}", metrics.variables)),
        palette.paint(format!("{:?}", metrics.content), ansi::CYAN),
        palette.paint(format!("{:?}", metrics.embeds), ansi::CYAN),
    );
    println!(
        "  Tag calls: {}  │  Segments: {}  │  Committed: {}",
        palette.paint(metrics.tag_calls.to_string(), ansi::YELLOW),
        palette.paint(metrics.segments.to_string(), ansi::YELLOW),
        palette.paint(metrics.committed.to_string(), ansi::YELLOW),
    );
    println!();
}

fn print_content(payload: &MessagePayload, palette: &ansi::Palette) {
    match payload.content.as_deref() {
        Some(content) if !content.is_empty() => {
            for line in content.lines() {
                println!("  {}", palette.bold(line));
            }
        }
        _ => println!("{}", palette.dim("  (none)")),
    }
}

fn print_embed(idx: usize, embed: &EmbedPayload, palette: &ansi::Palette) {
    let color = embed.color.map_or_else(|| "-".to_string(), |c| format!("#{c:06X}"));
    println!(
        "  {} {} {}",
        palette.paint(format!("[{}]", idx), ansi::GRAY),
        palette.bold(palette.paint(embed.title.as_deref().unwrap_or("(untitled)"), ansi::GREEN)),
        palette.paint(color, ansi::YELLOW),
    );

    let line = |label: &str, value: Option<&str>| {
        if let Some(value) = value {
            println!("      {} {}", palette.dim(format!("{label}:")), palette.paint(value, ansi::BLUE));
        }
    };

    line("author", embed.author.as_ref().map(|a| a.name.as_str()));
    line("url", embed.url.as_deref());
    line("description", embed.description.as_deref());
    line("thumbnail", embed.thumbnail.as_deref());
    line("image", embed.image.as_deref());
    line("footer", embed.footer.as_ref().map(|f| f.text.as_str()));
    let timestamp = embed.timestamp.map(|t| t.to_rfc3339());
    line("timestamp", timestamp.as_deref());

    for field in &embed.fields {
        println!(
            "      {} {} {} {}{}",
            palette.dim("field:"),
            palette.paint(&field.name, ansi::CYAN),
            palette.dim("│"),
            field.value,
            if field.inline { palette.dim("  (inline)") } else { String::new() },
        );
    }
}
