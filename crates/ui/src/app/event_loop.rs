use super::App;

use crossterm::event::{self, DisableBracketedPaste, EnableBracketedPaste, Event};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Result, Stdout};
use std::{panic, time::Duration};

const INPUT_POLL: Duration = Duration::from_millis(50);
const SPINNER_TICK: Duration = Duration::from_millis(100);

/// Read one terminal event if one is ready; terminal errors end the loop.
fn poll_event() -> Result<Option<Event>> {
    if event::poll(Duration::ZERO)? { Ok(Some(event::read()?)) } else { Ok(None) }
}

fn restore_terminal() -> Result<()> {
    crossterm::terminal::disable_raw_mode()?;
    crossterm::execute!(std::io::stdout(), DisableBracketedPaste, crossterm::terminal::LeaveAlternateScreen)?;
    Ok(())
}

impl App {
    /// Take over the terminal and run until the user quits.
    pub async fn run(&mut self) -> Result<()> {
        crossterm::terminal::enable_raw_mode()?;
        crossterm::execute!(std::io::stdout(), crossterm::terminal::EnterAlternateScreen, EnableBracketedPaste)?;

        let original_hook = panic::take_hook();
        panic::set_hook(Box::new(move |panic_info| {
            let _ = restore_terminal();
            original_hook(panic_info);
        }));

        let mut terminal = Terminal::new(CrosstermBackend::new(std::io::stdout()))?;
        terminal.clear()?;

        let result = self.event_loop(&mut terminal).await;

        self.close_panel();
        terminal.show_cursor()?;
        restore_terminal()?;
        result
    }

    async fn event_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        let mut spinner = tokio::time::interval(SPINNER_TICK);
        spinner.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        terminal.draw(|frame| self.render(frame))?;

        while !self.state.should_quit {
            let pending = self.state.is_pending();

            tokio::select! {
                maybe_event = async {
                    tokio::time::sleep(INPUT_POLL).await;
                    poll_event()
                } => {
                    let mut redraw = false;
                    let mut next = maybe_event?;
                    while let Some(event) = next {
                        self.handle_event(&event);
                        redraw = true;
                        next = poll_event()?;
                    }
                    if redraw {
                        terminal.draw(|frame| self.render(frame))?;
                    }
                }
                _ = spinner.tick(), if pending => {
                    self.state.tick();
                    terminal.draw(|frame| self.render(frame))?;
                }
                Some(event) = self.query_rx.recv() => {
                    if self.handle_query_event(event) {
                        terminal.draw(|frame| self.render(frame))?;
                    }
                }
            }
        }

        Ok(())
    }
}
