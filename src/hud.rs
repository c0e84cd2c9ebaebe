//! Score labels

/// Text shown over the scene
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HudText {
    pub score: String,
    pub best: String,
    pub status: &'static str,
}

impl HudText {
    pub fn new(score: u32, best: u32, ended: bool, can_restart: bool) -> Self {
        let status = match (ended, can_restart) {
            (false, _) => "",
            (true, false) => "Game over",
            (true, true) => "Game over - tap to retry",
        };
        Self {
            score: format!("Score:{score}"),
            best: format!("Best Score:{best}"),
            status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        let hud = HudText::new(3, 7, false, false);
        assert_eq!(hud.score, "Score:3");
        assert_eq!(hud.best, "Best Score:7");
        assert_eq!(hud.status, "");
        assert_eq!(HudText::new(0, 0, true, true).status, "Game over - tap to retry");
    }
}
