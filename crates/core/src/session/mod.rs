//! A single game of rhythm pizza: the measure, the offered deck, and the
//! derived views the presentation layer needs after every move.

use crate::{
    audio::{placement_cues, ToneCue},
    feedback::mission_text,
    slice::span_of,
    AngularSpan, Deck, Feedback, GameConfig, MeasureBuilder, NoteFragment, PizzaRenderer,
    PlacedFragment, PlaybackSchedule, RejectReason, Result, RhythmError,
};

/// Everything the presentation layer reacts to after a successful pick.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    pub placed: PlacedFragment,
    pub span: AngularSpan,
    pub cues: Vec<ToneCue>,
    /// True when this placement filled the measure.
    pub completed: bool,
    pub feedback: Option<Feedback>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    Placed(Placement),
    Rejected {
        fragment: NoteFragment,
        reason: RejectReason,
        feedback: Feedback,
    },
}

impl Selection {
    pub fn is_placed(&self) -> bool {
        matches!(self, Selection::Placed(_))
    }
}

/// Owns all mutable game state; every handler goes through a `&mut GameSession`.
#[derive(Debug)]
pub struct GameSession {
    config: GameConfig,
    measure: MeasureBuilder,
    deck: Deck,
}

impl GameSession {
    pub fn new(config: GameConfig) -> Result<Self> {
        config.validate()?;
        let deck = match config.seed {
            Some(seed) => Deck::seeded(seed),
            None => Deck::new(),
        };
        let measure = MeasureBuilder::with_capacity(config.capacity());
        tracing::info!(capacity = %measure.capacity(), seed = ?config.seed, "game session started");
        Ok(Self {
            config,
            measure,
            deck,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn measure(&self) -> &MeasureBuilder {
        &self.measure
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn mission(&self) -> String {
        mission_text(self.measure.capacity(), self.measure.is_complete())
    }

    /// Whether the play action is available.
    pub fn can_play(&self) -> bool {
        self.measure.is_complete()
    }

    pub fn select(&mut self, fragment: NoteFragment) -> Selection {
        match self.measure.try_add(fragment) {
            Ok(placed) => {
                let completed = self.measure.is_complete();
                if completed {
                    tracing::info!(fragments = self.measure.placed().len(), "measure complete");
                }
                Selection::Placed(Placement {
                    placed,
                    span: span_of(&placed, self.measure.capacity()),
                    cues: placement_cues(&fragment, &self.config.playback),
                    completed,
                    feedback: completed.then(|| Feedback::completed(self.measure.capacity())),
                })
            }
            Err(reason) => Selection::Rejected {
                fragment,
                reason,
                feedback: Feedback::rejected(&fragment, &reason),
            },
        }
    }

    /// Selects the card at a zero-based position of the current deck order.
    pub fn select_card(&mut self, position: usize) -> Result<Selection> {
        let fragment = self.deck.card(position)?;
        Ok(self.select(fragment))
    }

    /// Playback plan of the finished measure.
    pub fn play(&self) -> Result<PlaybackSchedule> {
        if !self.measure.is_complete() {
            return Err(RhythmError::NotComplete {
                accumulated: self.measure.accumulated(),
                capacity: self.measure.capacity(),
            });
        }
        let schedule = self
            .measure
            .build_playback_schedule(self.config.playback.beat_duration());
        tracing::info!(
            entries = schedule.len(),
            total_ms = schedule.total_duration().as_millis() as u64,
            "playback scheduled"
        );
        Ok(schedule)
    }

    pub fn reset(&mut self) -> Feedback {
        self.measure.reset(&mut self.deck);
        Feedback::reshuffled()
    }

    pub fn renderer(&self) -> PizzaRenderer {
        PizzaRenderer::new(self.config.geometry.clone(), self.measure.capacity())
    }
}
