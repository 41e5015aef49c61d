//! Console output for the chat transcript

use crate::progress::reporter::ProgressReporter;
use colored::{Color, Colorize};
use lingua_application::ports::chat_events::{ChatEvent, ChatEventSink};
use lingua_domain::{AnalysisReport, ChatMessage, LevelCode};
use std::sync::Arc;

/// Avatar colours, picked per sender name
const AVATAR_COLORS: [Color; 8] = [
    Color::Green,
    Color::Blue,
    Color::Yellow,
    Color::Magenta,
    Color::Cyan,
    Color::BrightRed,
    Color::BrightGreen,
    Color::BrightBlue,
];

/// Formats chat messages and analysis tables for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format one message of the transcript
    pub fn format_message(message: &ChatMessage) -> String {
        if message.is_notice() {
            return format!("{}", message.body().italic().dimmed());
        }

        let color = AVATAR_COLORS[message.avatar_index(AVATAR_COLORS.len())];
        let avatar = format!("[{}]", message.initials()).color(color).bold();
        format!(
            "{} {}\n{}",
            avatar,
            message.sender().bold(),
            Self::indent(message.body(), "    ")
        )
    }

    /// Format the word breakdown as a three-column table
    pub fn format_analysis(report: &AnalysisReport) -> String {
        let headers = ["Word", "Base form", "TAG"];
        let mut widths = headers.map(|h| h.chars().count());
        for row in &report.rows {
            for (width, cell) in widths
                .iter_mut()
                .zip([&row.word, &row.base_form, &row.tag])
            {
                *width = (*width).max(cell.chars().count());
            }
        }

        let line = |cells: [&str; 3]| {
            cells
                .iter()
                .zip(widths)
                .map(|(cell, width)| format!("{:<width$}", cell, width = width))
                .collect::<Vec<_>>()
                .join(" | ")
                .trim_end()
                .to_string()
        };

        let mut output = String::new();
        output.push_str(&format!("{}\n", "Text analysis".cyan().bold()));
        output.push_str(&format!("{}\n", report.original_text.dimmed()));
        output.push_str(&format!("{}\n", line(headers).bold()));
        output.push_str(&format!(
            "{}\n",
            widths
                .iter()
                .map(|w| "-".repeat(*w))
                .collect::<Vec<_>>()
                .join("-+-")
        ));
        for row in &report.rows {
            output.push_str(&line([&row.word, &row.base_form, &row.tag].map(String::as_str)));
            output.push('\n');
        }
        output
    }

    /// Error shown while filling in the join form
    pub fn form_error(message: &str) -> String {
        format!("{} {}", "!".red().bold(), message.red())
    }

    pub fn welcome() -> String {
        let line = "=".repeat(60);
        let levels = LevelCode::all()
            .iter()
            .map(|l| l.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "{}\n{:^60}\n{}\n\nPick your English level ({}) and start chatting.\nType /help for commands.\n",
            line.cyan(),
            "Lingua Chat - English Tutor".bold(),
            line.cyan(),
            levels
        )
    }

    pub fn help() -> String {
        let mut output = String::new();
        output.push_str(&format!("{}\n", "Commands:".cyan().bold()));
        output.push_str("  /help, /h, /?          - Show this help\n");
        output.push_str("  /image <path>...       - Share images (jpg, jpeg, png, webp)\n");
        output.push_str("                           quote paths with spaces: /image \"my cat.png\"\n");
        output.push_str("  /level [A1..C2]        - Show or change your English level\n");
        output.push_str("  /reset                 - Start a new conversation\n");
        output.push_str("  /quit, /exit, /q       - Exit chat\n");
        output
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Prints every chat event to stdout as it is published
pub struct ConsoleChatView {
    progress: Option<Arc<ProgressReporter>>,
    show_analysis: bool,
}

impl ConsoleChatView {
    pub fn new() -> Self {
        Self {
            progress: None,
            show_analysis: true,
        }
    }

    /// Hide the spinner while printing
    pub fn with_progress(mut self, progress: Arc<ProgressReporter>) -> Self {
        self.progress = Some(progress);
        self
    }

    pub fn with_analysis(mut self, show: bool) -> Self {
        self.show_analysis = show;
        self
    }

    /// Rendered text for an event, if it should be shown
    pub fn render(&self, event: &ChatEvent) -> Option<String> {
        match event {
            ChatEvent::Message(message) => Some(ConsoleFormatter::format_message(message)),
            ChatEvent::Analysis(report) if self.show_analysis => {
                Some(ConsoleFormatter::format_analysis(report))
            }
            ChatEvent::Analysis(_) => None,
            ChatEvent::AudioSaved(path) => {
                Some(format!("{}", format!("Audio saved: {}", path.display()).dimmed()))
            }
        }
    }
}

impl Default for ConsoleChatView {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatEventSink for ConsoleChatView {
    fn on_event(&self, event: &ChatEvent) {
        let Some(text) = self.render(event) else {
            return;
        };
        match &self.progress {
            Some(progress) => progress.suspend(|| println!("{}\n", text)),
            None => println!("{}\n", text),
        }
    }
}
