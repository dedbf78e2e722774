/// Which screen the window is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppState {
    #[default]
    Landing,
    /// Curtain transition from the landing screen to the board is running.
    Opening,
    Board,
}
