use super::theme::OneDark;
use nlcal_core::{
    Action, ActionedEvent, EventRecord,
    render::{format_record_line_with, format_span_with},
};
use termimad::{MadSkin, crossterm::style::Stylize};

#[derive(Clone)]
pub struct RenderOptions {
    pub date_format: String,
    pub use_color: bool,
}

pub struct Renderer {
    skin: MadSkin,
    opts: RenderOptions,
}

impl Renderer {
    pub fn new(config: Option<RenderOptions>) -> Self {
        Self {
            skin: OneDark::skin(),
            opts: config.unwrap_or_else(|| RenderOptions {
                date_format: nlcal_core::config::DEFAULT_DISPLAY_DATE_FORMAT.to_string(),
                use_color: true,
            }),
        }
    }

    pub fn print_md(&self, md: &str) {
        self.skin.print_text(md);
    }

    pub fn print_info(&self, message: &str) {
        if self.opts.use_color {
            let md = format!("|-|\n| {message} |\n|-|\n");
            self.print_md(&md);
        } else {
            println!("{message}");
        }
    }

    /// The confirmation label for a parsed statement, e.g.
    /// `add 2025/04/02 15:00～16:00 歯医者`.
    pub fn print_intent(&self, intent: &ActionedEvent) {
        let record = EventRecord::from(&intent.event);
        let action: &str = intent.action.as_ref();
        let mut action = action.to_string();
        let mut span = format_span_with(&record, &self.opts.date_format);
        let mut title = record.title.clone();
        if self.opts.use_color {
            let color = match intent.action {
                Action::Add => OneDark::GREEN,
                Action::Modify => OneDark::YELLOW,
                Action::Delete => OneDark::RED,
            };
            action = action.with(color).to_string();
            span = span.with(OneDark::BLUE).to_string();
            title = title.with(OneDark::YELLOW).to_string();
        }
        println!("{action} {span} {title}");
        if intent.action != Action::Add {
            let target = format!(
                "  ← {} {}",
                intent.original_title,
                intent.original_start.format("%Y-%m-%dT%H:%M")
            );
            if self.opts.use_color {
                println!("{}", target.with(OneDark::COMMENT));
            } else {
                println!("{target}");
            }
        }
    }

    /// `index` is zero-based.
    pub fn print_event_line(&self, index: usize, record: &EventRecord) {
        if !self.opts.use_color {
            println!(
                "{}",
                format_record_line_with(index, record, &self.opts.date_format)
            );
            return;
        }
        let number = format!("{}:", index + 1).with(OneDark::CYAN);
        let title = record.title.clone().with(OneDark::YELLOW);
        let span = format_span_with(record, &self.opts.date_format).with(OneDark::BLUE);
        println!("{number} {title} ({span})");
    }

    pub fn print_events(&self, records: &[EventRecord]) {
        for (i, record) in records.iter().enumerate() {
            self.print_event_line(i, record);
        }
    }
}
