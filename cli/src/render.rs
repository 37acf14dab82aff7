use core::fmt::Write;
use pairmatch_core::{CardState, CardView, SessionObserver, SessionSnapshot};

fn render_card(card: &CardView) -> String {
    match (card.state, card.symbol.as_deref()) {
        (CardState::Flipped, Some(symbol)) => format!(" {symbol} "),
        (CardState::Matched, Some(symbol)) => format!(" {symbol}*"),
        _ => format!("{:>3} ", card.id),
    }
}

pub fn render_status(snapshot: &SessionSnapshot) -> String {
    format!(
        "Moves: {} | Time: {} | Score: {} | Hint: ({} left)",
        snapshot.moves, snapshot.elapsed, snapshot.score, snapshot.hints_remaining
    )
}

/// Board as text: face-down cards show their id, face-up cards their symbol.
pub fn render_board(snapshot: &SessionSnapshot) -> String {
    let mut out = format!(
        "{} / {} ({} of {} pairs)\n",
        snapshot.difficulty, snapshot.theme, snapshot.matched_pairs, snapshot.board.pair_count
    );
    match snapshot.grid() {
        Ok(grid) => {
            for row in grid.rows() {
                let line: String = row.iter().map(render_card).collect();
                let _ = writeln!(out, "{}", line.trim_end());
            }
        }
        Err(err) => log::error!("Could not lay out board: {:?}", err),
    }
    out.push_str(&render_status(snapshot));
    if let Some(summary) = &snapshot.summary {
        let _ = write!(out, "\n{summary}");
    }
    out
}

/// Prints every session change, either as a board or as one JSON document per line.
#[derive(Debug, Default)]
pub struct Printer {
    json: bool,
    last: Option<SessionSnapshot>,
}

impl Printer {
    pub fn new(json: bool) -> Self {
        Self { json, last: None }
    }

    pub fn is_json(&self) -> bool {
        self.json
    }

    /// Whether `snapshot` differs from the last printed one by more than the clock.
    fn has_board_change(&self, snapshot: &SessionSnapshot) -> bool {
        let Some(last) = &self.last else {
            return true;
        };
        let mut timeless = snapshot.clone();
        timeless.elapsed_secs = last.elapsed_secs;
        timeless.elapsed.clone_from(&last.elapsed);
        &timeless != last
    }
}

impl SessionObserver for Printer {
    fn on_state_changed(&mut self, snapshot: &SessionSnapshot) {
        if self.json {
            match serde_json::to_string(snapshot) {
                Ok(line) => println!("{line}"),
                Err(err) => log::error!("Could not serialize snapshot: {:?}", err),
            }
            return;
        }

        if self.has_board_change(snapshot) {
            println!("{}\n", render_board(snapshot));
            self.last = Some(snapshot.clone());
        } else {
            log::trace!("clock at {}", snapshot.elapsed);
        }
    }
}
