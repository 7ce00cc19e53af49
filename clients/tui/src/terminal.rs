use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame, Terminal,
};
use std::io::Stdout;

use blackjack::{
    optimal_move, Bankrolls, Bet, Card, Chips, Decision, GameError, Hand, Party, PlayerInput,
    Prompt, Suit, TableView,
};

use crate::card_art::{card_art, visible_cards, CARD_HEIGHT};
use crate::tui_logger::LogBuffer;

const MAX_LOGS: usize = 20;

fn suit_color(suit: Suit) -> Color {
    match suit {
        Suit::Hearts => Color::Red,
        Suit::Diamonds => Color::from_u32(0xFF_A5_00), // Orange
        Suit::Clubs => Color::Magenta,                 // Purple
        Suit::Spades => Color::Black,
    }
}

/// What the player is being asked for right now
#[derive(Debug, Clone, PartialEq)]
enum Request {
    Idle,
    Bet { max: Chips },
    Decision { hint: Decision },
    YesNo(Prompt),
    AnyKey,
}

/// Everything the table currently shows
struct View {
    title: String,
    bankrolls: Option<Bankrolls>,
    dealer: Option<(Hand, bool)>,
    player: Option<Hand>,
    outcome: Option<String>,
    status: String,
    input: String,
    request: Request,
    logs: Vec<String>,
}

impl View {
    fn add_log(&mut self, message: String) {
        self.logs.push(message);
        if self.logs.len() > MAX_LOGS {
            self.logs.remove(0);
        }
    }
}

/// Full-screen table drawn with ratatui; reads keys straight from crossterm.
pub struct TerminalTable {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    log_buffer: LogBuffer,
    view: View,
}

enum Key {
    Abort,
    Pressed(KeyEvent),
}

impl TerminalTable {
    pub fn new(
        terminal: Terminal<CrosstermBackend<Stdout>>,
        log_buffer: LogBuffer,
        title: String,
    ) -> Self {
        Self {
            terminal,
            log_buffer,
            view: View {
                title,
                bankrolls: None,
                dealer: None,
                player: None,
                outcome: None,
                status: String::new(),
                input: String::new(),
                request: Request::Idle,
                logs: vec!["Welcome to Blackjack!".to_string()],
            },
        }
    }

    pub fn terminal_mut(&mut self) -> &mut Terminal<CrosstermBackend<Stdout>> {
        &mut self.terminal
    }

    fn sync_logs(&mut self) {
        // Pull any new log messages from the shared buffer
        let messages: Vec<String> = if let Ok(mut buffer) = self.log_buffer.lock() {
            buffer.drain(..).collect()
        } else {
            Vec::new()
        };

        for msg in messages {
            self.view.add_log(msg);
        }
    }

    fn redraw(&mut self) -> Result<(), GameError> {
        self.sync_logs();
        let view = &self.view;
        self.terminal.draw(|f| ui(f, view))?;
        Ok(())
    }

    fn next_key(&mut self) -> Result<Key, GameError> {
        loop {
            self.redraw()?;
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                let ctrl_c = key.modifiers.contains(KeyModifiers::CONTROL)
                    && key.code == KeyCode::Char('c');
                if ctrl_c || key.code == KeyCode::Esc {
                    return Ok(Key::Abort);
                }
                return Ok(Key::Pressed(key));
            }
        }
    }

    fn ask(&mut self, request: Request, status: String) {
        self.view.request = request;
        self.view.status = status;
        self.view.input.clear();
    }

    /// Leave `message` on screen until a key is pressed.
    pub fn pause(&mut self, message: &str) -> Result<(), GameError> {
        self.ask(Request::AnyKey, format!("{message} Press any key to exit."));
        self.next_key()?;
        Ok(())
    }
}

impl PlayerInput for TerminalTable {
    fn request_bet(&mut self, _min: Chips, max: Chips) -> Result<Chips, GameError> {
        self.ask(Request::Bet { max }, "Place your bet, then Enter".to_string());
        loop {
            let Key::Pressed(key) = self.next_key()? else {
                return Err(GameError::Aborted);
            };
            match key.code {
                KeyCode::Char(c) if c.is_ascii_digit() && self.view.input.len() < 18 => {
                    self.view.input.push(c);
                }
                KeyCode::Backspace => {
                    self.view.input.pop();
                }
                KeyCode::Enter => match Bet::parse(&self.view.input, max) {
                    Ok(bet) => {
                        self.view.request = Request::Idle;
                        self.view.input.clear();
                        return Ok(bet.amount());
                    }
                    Err(e) => {
                        self.view.status = format!("{e} Place your bet, then Enter");
                        self.view.input.clear();
                    }
                },
                _ => {}
            }
        }
    }

    fn request_decision(&mut self, player: &Hand, dealer_up: &Card) -> Result<Decision, GameError> {
        let hint = optimal_move(&player.cards, dealer_up);
        self.ask(
            Request::Decision { hint },
            "[H]it or [S]tand? Basic strategy is highlighted".to_string(),
        );
        loop {
            let Key::Pressed(key) = self.next_key()? else {
                return Err(GameError::Aborted);
            };
            let decision = match key.code {
                KeyCode::Char('h') | KeyCode::Char('H') => Decision::Hit,
                KeyCode::Char('s') | KeyCode::Char('S') => Decision::Stand,
                _ => {
                    self.view.status = "Invalid input...Please enter a hit or stand.".to_string();
                    continue;
                }
            };
            self.view.request = Request::Idle;
            self.view.status.clear();
            return Ok(decision);
        }
    }

    fn request_yes_no(&mut self, prompt: Prompt) -> Result<bool, GameError> {
        self.ask(Request::YesNo(prompt), prompt.to_string());
        loop {
            let Key::Pressed(key) = self.next_key()? else {
                return Err(GameError::Aborted);
            };
            let answer = match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') => true,
                KeyCode::Char('n') | KeyCode::Char('N') => false,
                _ => continue,
            };
            self.view.request = Request::Idle;
            return Ok(answer);
        }
    }
}

impl TableView for TerminalTable {
    fn show_bankrolls(&mut self, bankrolls: &Bankrolls) -> Result<(), GameError> {
        self.view.bankrolls = Some(*bankrolls);
        self.redraw()
    }

    fn show_hand(&mut self, party: Party, hand: &Hand, reveal_all: bool) -> Result<(), GameError> {
        match party {
            Party::Dealer => {
                if !reveal_all {
                    // A fresh deal
                    self.view.outcome = None;
                    self.view.player = None;
                }
                self.view.dealer = Some((hand.clone(), reveal_all));
            }
            Party::Player => self.view.player = Some(hand.clone()),
        }
        self.redraw()
    }

    fn show_outcome(
        &mut self,
        message: &str,
        _dealer_total: u8,
        _player_total: u8,
    ) -> Result<(), GameError> {
        self.view.outcome = Some(message.to_string());
        self.view.add_log(message.to_string());
        self.redraw()
    }

    fn show_message(&mut self, message: &str) -> Result<(), GameError> {
        self.view.status = message.to_string();
        self.view.add_log(message.to_string());
        self.redraw()
    }
}

fn hand_lines(hand: &Hand, reveal_all: bool) -> Vec<Line<'static>> {
    let arts: Vec<(Option<Suit>, [String; CARD_HEIGHT])> = visible_cards(hand, reveal_all)
        .map(|card| (card.map(|c| c.suit), card_art(card)))
        .collect();

    (0..CARD_HEIGHT)
        .map(|row| {
            let spans: Vec<Span> = arts
                .iter()
                .flat_map(|(suit, art)| {
                    let style = match suit {
                        Some(suit) => Style::default().fg(suit_color(*suit)).bg(Color::Gray),
                        None => Style::default().fg(Color::Blue).bg(Color::Gray),
                    };
                    [Span::styled(art[row].clone(), style), Span::raw(" ")]
                })
                .collect();
            Line::from(spans)
        })
        .collect()
}

fn render_hand(f: &mut Frame, area: Rect, title: String, lines: Vec<Line<'static>>) {
    let block = Paragraph::new(lines).block(Block::default().title(title).borders(Borders::ALL));
    f.render_widget(block, area);
}

fn key_style(highlight: bool) -> Style {
    if highlight {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Yellow)
    }
}

fn ui(f: &mut Frame, view: &View) {
    // Main layout: Top section and bottom section
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints(
            [
                Constraint::Length(3),  // Title bar
                Constraint::Min(10),    // Main game area
                Constraint::Length(3),  // Status bar
            ]
            .as_ref(),
        )
        .split(f.area());

    let title_text = match view.bankrolls {
        Some(b) => format!(
            "{} | Player's money: ${} | Dealer's money: ${}",
            view.title, b.player, b.house
        ),
        None => view.title.clone(),
    };
    let title = Paragraph::new(title_text)
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, main_chunks[0]);

    let main_horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)].as_ref())
        .split(main_chunks[1]);

    // Dealer on top, player below, outcome line at the bottom
    let game_area = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Percentage(45),
                Constraint::Percentage(45),
                Constraint::Min(3),
            ]
            .as_ref(),
        )
        .split(main_horizontal[0]);

    match &view.dealer {
        Some((hand, reveal_all)) => {
            let title = if *reveal_all {
                format!(" Dealer Hand ({}) ", hand.value())
            } else {
                " Dealer Hand ".to_string()
            };
            render_hand(f, game_area[0], title, hand_lines(hand, *reveal_all));
        }
        None => render_hand(f, game_area[0], " Dealer Hand ".to_string(), Vec::new()),
    }

    match &view.player {
        Some(hand) => {
            let title = format!(" Your Hand ({}) ", hand.value());
            render_hand(f, game_area[1], title, hand_lines(hand, true));
        }
        None => render_hand(f, game_area[1], " Your Hand ".to_string(), Vec::new()),
    }

    let outcome_style = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
    let outcome = Paragraph::new(view.outcome.clone().unwrap_or_default())
        .style(outcome_style)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(outcome, game_area[2]);

    // Logs/Info box
    let log_area = main_horizontal[1];
    let log_frame_height = log_area.height.saturating_sub(2) as usize; // Subtract borders
    let log_start_idx = view.logs.len().saturating_sub(log_frame_height);
    let log_lines: Vec<Line> = view
        .logs
        .iter()
        .skip(log_start_idx)
        .map(|log| {
            Line::from(vec![
                Span::styled("• ", Style::default().fg(Color::DarkGray)),
                Span::raw(log.clone()),
            ])
        })
        .collect();
    let logs_widget = Paragraph::new(log_lines)
        .block(
            Block::default()
                .title(" Game Log ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Green)),
        )
        .style(Style::default().fg(Color::Gray))
        .wrap(Wrap { trim: true });
    f.render_widget(logs_widget, log_area);

    // Status bar at bottom
    let status_line = match &view.request {
        Request::Decision { hint } => Line::from(vec![
            Span::styled("[H]it", key_style(*hint == Decision::Hit)),
            Span::raw("  "),
            Span::styled("[S]tand", key_style(*hint == Decision::Stand)),
            Span::raw("  "),
            Span::raw(view.status.clone()),
        ]),
        Request::Bet { max } => Line::from(vec![
            Span::raw(view.status.clone()),
            Span::raw(format!(" (max ${max}) > ")),
            Span::styled(view.input.clone(), Style::default().fg(Color::Yellow)),
        ]),
        Request::YesNo(_) => Line::from(vec![
            Span::raw(view.status.clone()),
            Span::raw("  "),
            Span::styled("[Y]es", key_style(false)),
            Span::raw(" / "),
            Span::styled("[N]o", key_style(false)),
        ]),
        Request::Idle | Request::AnyKey => Line::from(view.status.clone()),
    };
    let status_bar = Paragraph::new(status_line)
        .style(Style::default().fg(Color::White))
        .block(Block::default().borders(Borders::ALL).title(" Esc to quit "));
    f.render_widget(status_bar, main_chunks[2]);
}
