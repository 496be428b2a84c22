/// Status lines shown to the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusMessage {
    GameStart,
    InvalidPositions,
    WaitForStart,
    Wait,
    GameOn,
    YourTurn,
    Hit,
    Miss,
    ShipSunk,
    LostShip,
    LostGame,
    Won,
}

impl StatusMessage {
    /// Text for this status.
    pub const fn text(self) -> &'static str {
        match self {
            StatusMessage::GameStart => {
                "Arrange your ships, then fire at the enemy board to start the game."
            }
            StatusMessage::InvalidPositions => {
                "All ships must be in valid positions before the game can begin."
            }
            StatusMessage::WaitForStart => "Waiting for the enemy to place their ships.",
            StatusMessage::Wait => "Wait your turn!",
            StatusMessage::GameOn => "Game on!",
            StatusMessage::YourTurn => "Your turn, fire now!",
            StatusMessage::Hit => "Good hit!",
            StatusMessage::Miss => "Miss.",
            StatusMessage::ShipSunk => "You sank a ship!",
            StatusMessage::LostShip => "You lost a ship!",
            StatusMessage::LostGame => "You lost this time.",
            StatusMessage::Won => "Congratulations! You won!",
        }
    }
}

impl core::fmt::Display for StatusMessage {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.text())
    }
}
