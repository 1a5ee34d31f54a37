// Game session and player actions
// Routes reveal, flag and debug actions onto the board, generator and flood reveal

use log::{debug, info};
use rand::Rng;
use rand::rngs::StdRng;

use crate::xtm_board::{BOARD_SIDE, Board, CellState};
use crate::xtm_gen::{self, GenError, MINE_COUNT};
use crate::xtm_reveal::{self, RevealOutcome};

/// A player or debug action, already mapped to grid coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Reveal { row: usize, col: usize },
    ToggleFlag { row: usize, col: usize },
    Regenerate, // Debug: new mine layout, no safe zone
    RevealAll,  // Debug: open everything without losing
    NewGame,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Ready,   // No mines laid yet
    Playing,
    Lost,
    Won,
}

impl GameStatus {
    pub fn is_finished(self) -> bool {
        matches!(self, GameStatus::Lost | GameStatus::Won)
    }
}

/// Per-game state
pub struct Session<R: Rng = StdRng> {
    board: Board,
    mines: usize,          // Total mine count
    generated: bool,       // Mines laid (first reveal happened)
    game_over: bool,       // A mine was revealed
    flag_count: usize,     // Flags still available to place
    rng: R,
}

impl<R: Rng> Session<R> {
    /// Standard 16x16 session with 40 mines
    pub fn new(rng: R) -> Result<Self, GenError> {
        Self::with_dimensions(BOARD_SIDE, MINE_COUNT, rng)
    }

    /// Session on a custom square board
    /// Fails when the mines could not fit around the largest possible safe zone
    pub fn with_dimensions(side: usize, mines: usize, rng: R) -> Result<Self, GenError> {
        let free = xtm_gen::worst_case_eligible(side);
        if mines > free {
            return Err(GenError::NotEnoughRoom { mines, free });
        }
        Ok(Session {
            board: Board::new(side),
            mines,
            generated: false,
            game_over: false,
            flag_count: mines,
            rng,
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn flag_count(&self) -> usize {
        self.flag_count
    }

    pub fn is_generated(&self) -> bool {
        self.generated
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn status(&self) -> GameStatus {
        if self.is_game_over() {
            GameStatus::Lost
        } else if !self.is_generated() {
            GameStatus::Ready
        } else if self.board.iter().all(|c| c.mine != c.is_revealed()) {
            GameStatus::Won
        } else {
            GameStatus::Playing
        }
    }

    /// Apply one action; out-of-range coordinates are ignored
    pub fn apply(&mut self, action: Action) -> Result<(), GenError> {
        match action {
            Action::Reveal { row, col } => {
                self.reveal_at(row, col)?;
            }
            Action::ToggleFlag { row, col } => self.toggle_flag(row, col),
            Action::Regenerate => self.regenerate()?,
            Action::RevealAll => self.reveal_all(),
            Action::NewGame => self.new_game(),
        }
        Ok(())
    }

    /// Reveal a cell; the first reveal lays mines around it
    /// Ignored once the game is finished
    pub fn reveal_at(&mut self, row: usize, col: usize) -> Result<RevealOutcome, GenError> {
        if !self.board.contains(row, col) || self.status().is_finished() {
            return Ok(RevealOutcome::Ignored);
        }
        if !self.generated {
            xtm_gen::generate(&mut self.board, self.mines, Some((row, col)), &mut self.rng)?;
            self.generated = true;
        }
        if self.board.cell(row, col).is_flagged() {
            return Ok(RevealOutcome::Ignored);
        }

        let outcome = xtm_reveal::reveal(&mut self.board, row, col);
        match outcome {
            RevealOutcome::Detonated => {
                self.game_over = true;
                info!(
                    "mine hit at ({row}, {col}) with {} cells revealed, game over",
                    self.board.revealed_count()
                );
            }
            RevealOutcome::Cleared(n) => {
                debug!("revealed {n} cells from ({row}, {col})");
                if self.status() == GameStatus::Won {
                    info!("all safe cells cleared");
                }
            }
            RevealOutcome::Ignored => {}
        }
        Ok(outcome)
    }

    /// Place or lift a flag on a hidden cell
    /// Placing is refused when no flags remain; lifting always succeeds
    pub fn toggle_flag(&mut self, row: usize, col: usize) {
        if !self.board.contains(row, col) || self.status().is_finished() {
            return;
        }
        let available = self.flag_count;
        let cell = self.board.cell_mut(row, col);
        match cell.state {
            CellState::Revealed => {}
            CellState::Flagged => {
                cell.state = CellState::Hidden;
                self.flag_count += 1;
            }
            CellState::Hidden if available == 0 => {}
            CellState::Hidden => {
                cell.state = CellState::Flagged;
                self.flag_count -= 1;
            }
        }
        debug!("{} flags placed, {} left", self.board.flagged_count(), self.flag_count);
    }

    /// Debug: clear the board and lay a fresh layout without a safe zone
    /// Keeps game-over and flag count untouched
    pub fn regenerate(&mut self) -> Result<(), GenError> {
        if !self.generated {
            return Ok(());
        }
        self.board.clear();
        xtm_gen::generate(&mut self.board, self.mines, None, &mut self.rng)?;
        debug!("board regenerated with {} mines", self.board.mine_count());
        Ok(())
    }

    /// Debug: reveal every cell without triggering game over
    pub fn reveal_all(&mut self) {
        if !self.generated {
            return;
        }
        xtm_reveal::reveal_all(&mut self.board);
        debug!("revealed all cells");
    }

    /// Start over with a cleared board and a full set of flags
    pub fn new_game(&mut self) {
        self.board.clear();
        self.generated = false;
        self.game_over = false;
        self.flag_count = self.mines;
        debug!("new game");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn session(seed: u64) -> Session {
        Session::new(StdRng::seed_from_u64(seed)).unwrap()
    }

    /// First safe non-mine cell with a positive danger level
    fn numbered_cell(s: &Session) -> (usize, usize) {
        let cell = s
            .board()
            .iter()
            .find(|c| !c.mine && c.danger > 0 && !c.is_revealed())
            .expect("board has a hidden numbered cell");
        (cell.row, cell.col)
    }

    fn mine_cell(s: &Session) -> (usize, usize) {
        let cell = s.board().iter().find(|c| c.mine).expect("board has mines");
        (cell.row, cell.col)
    }

    #[test]
    fn fresh_session_is_ready() {
        let s = session(1);
        assert_eq!(s.status(), GameStatus::Ready);
        assert_eq!(s.flag_count(), MINE_COUNT);
        assert!(!s.is_generated());
        assert_eq!(s.board().mine_count(), 0);
    }

    #[test]
    fn first_reveal_generates_and_is_safe() {
        for seed in 0..20 {
            let mut s = session(seed);
            let outcome = s.reveal_at(4, 12).unwrap();
            assert!(s.is_generated());
            assert_eq!(s.board().mine_count(), MINE_COUNT);
            assert!(matches!(outcome, RevealOutcome::Cleared(n) if n >= 9));
            assert!(!s.is_game_over());
        }
    }

    #[test]
    fn later_reveals_do_not_regenerate() {
        let mut s = session(2);
        s.reveal_at(0, 0).unwrap();
        let layout: Vec<_> = s.board().iter().map(|c| c.mine).collect();
        let (r, c) = numbered_cell(&s);
        s.reveal_at(r, c).unwrap();
        let after: Vec<_> = s.board().iter().map(|c| c.mine).collect();
        assert_eq!(layout, after);
    }

    #[test]
    fn revealing_a_mine_ends_the_game() {
        let mut s = session(3);
        s.reveal_at(8, 8).unwrap();
        let before = s.board().revealed_count();
        let (r, c) = mine_cell(&s);

        assert_eq!(s.reveal_at(r, c).unwrap(), RevealOutcome::Detonated);
        assert!(s.is_game_over());
        assert_eq!(s.status(), GameStatus::Lost);
        assert_eq!(s.board().revealed_count(), before + 1);
    }

    #[test]
    fn finished_game_ignores_reveal_and_flag() {
        let mut s = session(4);
        s.reveal_at(8, 8).unwrap();
        let (r, c) = mine_cell(&s);
        s.reveal_at(r, c).unwrap();

        let revealed = s.board().revealed_count();
        let (nr, nc) = numbered_cell(&s);
        assert_eq!(s.reveal_at(nr, nc).unwrap(), RevealOutcome::Ignored);
        s.toggle_flag(nr, nc);
        assert_eq!(s.board().revealed_count(), revealed);
        assert_eq!(s.board().flagged_count(), 0);
        assert_eq!(s.flag_count(), MINE_COUNT);
    }

    #[test]
    fn flag_toggle_tracks_flag_count() {
        let mut s = session(5);
        s.toggle_flag(0, 0);
        assert!(s.board().cell(0, 0).is_flagged());
        assert_eq!(s.flag_count(), MINE_COUNT - 1);

        s.toggle_flag(0, 0);
        assert!(!s.board().cell(0, 0).is_flagged());
        assert_eq!(s.flag_count(), MINE_COUNT);
    }

    #[test]
    fn flagging_is_refused_when_no_flags_remain() {
        let mut s = Session::with_dimensions(8, 3, StdRng::seed_from_u64(6)).unwrap();
        for col in 0..3 {
            s.toggle_flag(0, col);
        }
        assert_eq!(s.flag_count(), 0);

        s.toggle_flag(0, 3);
        assert!(!s.board().cell(0, 3).is_flagged());
        assert_eq!(s.flag_count(), 0);

        // Lifting a flag still works at zero
        s.toggle_flag(0, 1);
        assert_eq!(s.flag_count(), 1);
        assert!(!s.board().cell(0, 1).is_flagged());
    }

    #[test]
    fn flagged_cell_cannot_be_revealed_until_unflagged() {
        let mut s = session(7);
        s.reveal_at(8, 8).unwrap();
        let (r, c) = numbered_cell(&s);

        s.toggle_flag(r, c);
        assert_eq!(s.reveal_at(r, c).unwrap(), RevealOutcome::Ignored);
        assert!(s.board().cell(r, c).is_flagged());

        s.toggle_flag(r, c);
        assert_eq!(s.reveal_at(r, c).unwrap(), RevealOutcome::Cleared(1));
    }

    #[test]
    fn revealed_cell_cannot_be_flagged() {
        let mut s = session(8);
        s.reveal_at(8, 8).unwrap();
        s.toggle_flag(8, 8);
        assert!(!s.board().cell(8, 8).is_flagged());
        assert_eq!(s.flag_count(), MINE_COUNT);
    }

    #[test]
    fn first_click_on_a_flag_generates_but_does_not_reveal() {
        let mut s = session(9);
        s.toggle_flag(5, 5);
        assert_eq!(s.reveal_at(5, 5).unwrap(), RevealOutcome::Ignored);
        assert!(s.is_generated());
        assert_eq!(s.board().revealed_count(), 0);
        assert!(s.board().cell(5, 5).is_flagged());
    }

    #[test]
    fn out_of_range_actions_are_ignored() {
        let mut s = session(10);
        assert_eq!(s.reveal_at(16, 0).unwrap(), RevealOutcome::Ignored);
        assert!(!s.is_generated());
        s.toggle_flag(0, 16);
        assert_eq!(s.flag_count(), MINE_COUNT);
    }

    #[test]
    fn debug_actions_need_a_generated_board() {
        let mut s = session(11);
        s.regenerate().unwrap();
        s.reveal_all();
        assert_eq!(s.board().mine_count(), 0);
        assert_eq!(s.board().revealed_count(), 0);
    }

    #[test]
    fn regenerate_keeps_flag_count_and_game_over() {
        let mut s = session(12);
        s.reveal_at(8, 8).unwrap();
        let mines: Vec<_> = s
            .board()
            .iter()
            .filter(|c| c.mine)
            .map(|c| (c.row, c.col))
            .collect();
        s.toggle_flag(mines[0].0, mines[0].1);
        s.reveal_at(mines[1].0, mines[1].1).unwrap();

        s.regenerate().unwrap();

        assert_eq!(s.board().mine_count(), MINE_COUNT);
        assert_eq!(s.board().revealed_count(), 0);
        assert_eq!(s.board().flagged_count(), 0);
        assert_eq!(s.flag_count(), MINE_COUNT - 1);
        assert!(s.is_game_over());
    }

    #[test]
    fn reveal_all_does_not_end_the_game() {
        let mut s = session(13);
        s.reveal_at(8, 8).unwrap();
        let layout: Vec<_> = s.board().iter().map(|c| (c.mine, c.danger)).collect();

        s.apply(Action::RevealAll).unwrap();

        assert_eq!(s.board().revealed_count(), 256);
        assert!(!s.is_game_over());
        let after: Vec<_> = s.board().iter().map(|c| (c.mine, c.danger)).collect();
        assert_eq!(layout, after);
        // Mines are showing, so this is not a win
        assert_eq!(s.status(), GameStatus::Playing);
    }

    #[test]
    fn clearing_every_safe_cell_wins() {
        let mut s = Session::with_dimensions(6, 1, StdRng::seed_from_u64(14)).unwrap();
        s.reveal_at(0, 0).unwrap();
        let safe: Vec<_> = s
            .board()
            .iter()
            .filter(|c| !c.mine)
            .map(|c| (c.row, c.col))
            .collect();
        for (r, c) in safe {
            s.reveal_at(r, c).unwrap();
        }
        assert_eq!(s.status(), GameStatus::Won);

        let (r, c) = mine_cell(&s);
        assert_eq!(s.reveal_at(r, c).unwrap(), RevealOutcome::Ignored);
    }

    #[test]
    fn new_game_resets_everything() {
        let mut s = session(15);
        s.apply(Action::Reveal { row: 8, col: 8 }).unwrap();
        s.apply(Action::ToggleFlag { row: 0, col: 0 }).unwrap();
        s.apply(Action::NewGame).unwrap();

        assert_eq!(s.status(), GameStatus::Ready);
        assert_eq!(s.flag_count(), MINE_COUNT);
        assert_eq!(s.board().mine_count(), 0);
        assert_eq!(s.board().revealed_count(), 0);
        assert_eq!(s.board().flagged_count(), 0);
    }

    #[test]
    fn oversized_mine_count_is_rejected() {
        let err = Session::with_dimensions(5, 1, StdRng::seed_from_u64(0)).err();
        assert_eq!(err, Some(GenError::NotEnoughRoom { mines: 1, free: 0 }));
        assert!(Session::with_dimensions(16, 231, StdRng::seed_from_u64(0)).is_ok());
    }
}
