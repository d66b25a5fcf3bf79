//! Generation history buffer with optional bounded retention

use crate::lattice::generation::Generation;
use ndarray::Array2;
use std::collections::VecDeque;

/// How many generations a history keeps
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Retention {
    /// Keep every generation from step 0
    #[default]
    All,
    /// Keep only the most recent `n` generations (at least one is always kept)
    Window(usize),
}

/// Ordered generations indexed by absolute time step
///
/// All generations share the width of the initial one. Under
/// [`Retention::Window`] older generations are dropped from the front and
/// [`History::first_step`] reports the step of the oldest one still held.
#[derive(Clone, Debug)]
pub struct History {
    generations: VecDeque<Generation>,
    first_step: usize,
    width: usize,
    retention: Retention,
}

impl History {
    /// Start a history at step 0 with the initial generation
    pub fn new(initial: Generation, retention: Retention) -> Self {
        let capacity = match retention {
            Retention::All => 1,
            Retention::Window(n) => n.max(1),
        };
        let width = initial.len();
        let mut generations = VecDeque::with_capacity(capacity);
        generations.push_back(initial);

        Self {
            generations,
            first_step: 0,
            width,
            retention,
        }
    }

    /// Append the next generation, evicting the oldest if the window is full
    ///
    /// Generations of the wrong width are ignored; the engine never produces one.
    pub(crate) fn push(&mut self, generation: Generation) {
        if generation.len() != self.width {
            return;
        }
        self.generations.push_back(generation);
        if let Retention::Window(n) = self.retention {
            while self.generations.len() > n.max(1) {
                self.generations.pop_front();
                self.first_step += 1;
            }
        }
    }

    /// Number of cells in every generation
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Number of generations currently held
    pub fn len(&self) -> usize {
        self.generations.len()
    }

    /// Always false: the initial generation (or its successor) is always held
    pub fn is_empty(&self) -> bool {
        self.generations.is_empty()
    }

    /// Absolute step of the oldest retained generation
    pub const fn first_step(&self) -> usize {
        self.first_step
    }

    /// Absolute step of the newest generation
    pub fn last_step(&self) -> usize {
        self.first_step + self.generations.len().saturating_sub(1)
    }

    /// Generation at absolute time `step`, if still retained
    pub fn get(&self, step: usize) -> Option<&Generation> {
        step.checked_sub(self.first_step)
            .and_then(|offset| self.generations.get(offset))
    }

    /// Most recent generation
    pub fn latest(&self) -> Option<&Generation> {
        self.generations.back()
    }

    /// Retained generations, oldest first
    pub fn iter(&self) -> impl Iterator<Item = &Generation> {
        self.generations.iter()
    }

    /// Density of every retained generation, oldest first
    pub fn densities(&self) -> Vec<f64> {
        self.generations.iter().map(Generation::density).collect()
    }

    /// Retained generations as a matrix: one row per generation, one column per cell
    pub fn to_array(&self) -> Array2<u8> {
        let mut matrix = Array2::zeros((self.generations.len(), self.width));
        for (mut row, generation) in matrix.rows_mut().into_iter().zip(&self.generations) {
            for (cell, value) in row.iter_mut().zip(generation.iter()) {
                *cell = value;
            }
        }
        matrix
    }
}
