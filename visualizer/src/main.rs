use chart::LifeChart;
use iced::{
    time,
    widget::{button, canvas::Canvas, column, mouse_area, row, text, text_input, Column, Container, Row},
    window, Alignment, Element, Length, Subscription, Task, Theme,
};
use lifecore::config::DEFAULT_CONFIG_PATH;
use lifecore::{EventKind, Point, Tracker, TrackerConfig};
use log::{error, warn};
use std::path::PathBuf;

mod chart;
mod quotes;

fn main() -> iced::Result {
    env_logger::init();
    iced::application(Visualizer::boot, Visualizer::update, Visualizer::view)
        .title(application_title)
        .subscription(application_subscription)
        .theme(application_theme)
        .window(window::Settings {
            exit_on_close_request: false,
            ..window::Settings::default()
        })
        .run()
}

fn application_title(_: &Visualizer) -> String {
    "Life Event Tracker".into()
}

fn application_subscription(state: &Visualizer) -> Subscription<Message> {
    Subscription::batch([
        time::every(state.tracker.scheduler().period()).map(|_| Message::Tick),
        window::close_requests().map(Message::CloseRequested),
    ])
}

fn application_theme(_: &Visualizer) -> Theme {
    Theme::Light
}

struct Visualizer {
    tracker: Tracker,
    chart: Vec<Point>,
    tab: Tab,
    user_path: String,
    hovered: Option<EventKind>,
    quote: &'static str,
    status: String,
    history: Vec<String>,
}

#[derive(Debug, Clone)]
enum Message {
    Tick,
    Record(EventKind),
    Hover(Option<EventKind>),
    TabSelected(Tab),
    PathChanged(String),
    Save,
    Load,
    Clear,
    CloseRequested(window::Id),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tab {
    Save,
    Load,
    Clear,
}

impl Tab {
    const ALL: [Tab; 3] = [Tab::Save, Tab::Load, Tab::Clear];

    fn title(self) -> &'static str {
        match self {
            Tab::Save => "Save",
            Tab::Load => "Load",
            Tab::Clear => "Clear",
        }
    }
}

impl Visualizer {
    fn boot() -> (Self, Task<Message>) {
        let mut status = String::from("Ready.");
        let config = TrackerConfig::load_or_default(DEFAULT_CONFIG_PATH).unwrap_or_else(|err| {
            warn!("{err}; using defaults");
            status = format!("Config error: {err}");
            TrackerConfig::default()
        });
        let tracker = Tracker::startup(&config).unwrap_or_else(|err| {
            error!("{err}; starting with an empty chart, autosave disabled");
            status = format!("Autosave error: {err} (this session will not overwrite it)");
            Tracker::detached(&config)
        });

        let visualizer = Visualizer {
            chart: tracker.snapshot().to_vec(),
            tracker,
            tab: Tab::Save,
            user_path: "chart.txt".into(),
            hovered: None,
            quote: quotes::random_quote(),
            status,
            history: Vec::new(),
        };
        (visualizer, Task::none())
    }

    fn update(state: &mut Self, message: Message) -> Task<Message> {
        match message {
            Message::Tick => {
                state.tracker.tick(&mut state.chart);
                Task::none()
            }
            Message::Record(kind) => {
                let value = state.tracker.record(kind);
                state.push_history(format!("{}: {value:.2}", kind.label()));
                Task::none()
            }
            Message::Hover(kind) => {
                state.hovered = kind;
                Task::none()
            }
            Message::TabSelected(tab) => {
                state.tab = tab;
                Task::none()
            }
            Message::PathChanged(path) => {
                state.user_path = path;
                Task::none()
            }
            Message::Save => {
                let Some(path) = state.selected_path() else {
                    return Task::none();
                };
                state.status = match state.tracker.save_to(&path) {
                    Ok(()) => format!("Saved {} points to {}", state.chart_len(), path.display()),
                    Err(err) => format!("Save failed: {err}"),
                };
                Task::none()
            }
            Message::Load => {
                let Some(path) = state.selected_path() else {
                    return Task::none();
                };
                state.status = match state.tracker.load_from(&path) {
                    Ok(count) => {
                        state.tracker.tick(&mut state.chart);
                        format!("Loaded {count} points from {}", path.display())
                    }
                    Err(err) => format!("Load failed: {err}"),
                };
                Task::none()
            }
            Message::Clear => {
                state.tracker.clear();
                state.chart = state.tracker.snapshot().to_vec();
                state.status = "Chart cleared.".into();
                Task::none()
            }
            Message::CloseRequested(id) => {
                if let Err(err) = state.tracker.shutdown() {
                    error!("autosave failed: {err}");
                }
                window::close(id)
            }
        }
    }

    fn view(state: &Self) -> Element<'_, Message> {
        let tabs = Tab::ALL.iter().fold(Row::new().spacing(4), |tabs, tab| {
            let label = if *tab == state.tab {
                format!("[{}]", tab.title())
            } else {
                tab.title().to_string()
            };
            tabs.push(button(text(label)).on_press(Message::TabSelected(*tab)).padding(6))
        });

        let path_input = text_input("File path", &state.user_path)
            .on_input(Message::PathChanged)
            .padding(6)
            .width(Length::Fixed(280.0));
        let tab_body: Element<'_, Message> = match state.tab {
            Tab::Save => row![path_input, button("Save Chart").on_press(Message::Save).padding(10)]
                .spacing(10)
                .align_y(Alignment::Center)
                .into(),
            Tab::Load => row![path_input, button("Load Chart").on_press(Message::Load).padding(10)]
                .spacing(10)
                .align_y(Alignment::Center)
                .into(),
            Tab::Clear => button("Clear Chart").on_press(Message::Clear).padding(10).into(),
        };

        let event_buttons = EventKind::ALL.iter().fold(Row::new().spacing(6), |buttons, kind| {
            buttons.push(
                mouse_area(button(text(kind.label())).on_press(Message::Record(*kind)).padding(8))
                    .on_enter(Message::Hover(Some(*kind)))
                    .on_exit(Message::Hover(None)),
            )
        });
        let example = text(state.hovered.map(EventKind::example).unwrap_or_default()).size(12);

        let chart = Canvas::new(LifeChart::new(state.chart.clone()))
            .width(Length::Fill)
            .height(Length::Fixed(400.0));

        let history_list = if state.history.is_empty() {
            Column::new().push(text("No events yet").size(12))
        } else {
            state
                .history
                .iter()
                .rev()
                .fold(Column::new().spacing(2), |col, entry| {
                    col.push(text(entry.clone()).size(12))
                })
        };

        let metrics = state.tracker.metrics();
        let summary = text(format!(
            "Running value {:.2} | {} points | {} events this session",
            state.tracker.current_value(),
            state.chart_len(),
            metrics.events()
        ))
        .size(14);

        let layout = column![
            tabs,
            Container::new(tab_body).padding(6),
            row![
                column![event_buttons, example].spacing(4),
                Container::new(history_list).width(Length::Fill).padding(6),
            ]
            .spacing(20),
            chart,
            summary,
            text(state.quote).size(12),
            text(&state.status).size(12),
        ]
        .spacing(10)
        .padding(16);

        Container::new(layout)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    fn selected_path(&mut self) -> Option<PathBuf> {
        let trimmed = self.user_path.trim();
        if trimmed.is_empty() {
            self.status = "Enter a file path first.".into();
            None
        } else {
            Some(PathBuf::from(trimmed))
        }
    }

    fn chart_len(&self) -> usize {
        self.tracker.snapshot().len()
    }

    fn push_history(&mut self, entry: String) {
        self.history.push(entry);
        if self.history.len() > 8 {
            self.history.remove(0);
        }
    }
}
