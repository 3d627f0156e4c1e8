//! Greedy stroke-by-stroke evolution of a genome.

use std::sync::Arc;

use image::GrayImage;

use super::rng::{StrokeRng, select_fields};
use crate::compute::{Renderer, Scene, absolute_error};
use crate::error::PaintError;
use crate::schema::{Gene, Genome};

/// Outcome of one [`Painter::evolve_once`] pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PassReport {
    /// Mutations kept during the pass.
    pub accepted: usize,
    /// Error after the pass.
    pub error: u64,
}

/// Owns a genome together with its render cache.
///
/// The cached error and image always describe the current genome: they are
/// replaced together, and only when a mutation is accepted.
#[derive(Debug, Clone)]
pub struct Painter {
    scene: Arc<Scene>,
    genome: Genome,
    error: u64,
    image: GrayImage,
}

impl Painter {
    /// Generate `stroke_count` random strokes and render them once.
    ///
    /// Stroke `i` is drawn from stream `(seed, i, 0)`, so the same scene and
    /// seed always produce the same genome.
    pub fn init_genome(
        scene: Arc<Scene>,
        stroke_count: usize,
        seed: u64,
    ) -> Result<Self, PaintError> {
        let genome: Genome = {
            let domain = scene.domain();
            (0..stroke_count)
                .map(|i| StrokeRng::derive(seed, i, 0).random_gene(&domain))
                .collect()
        };

        let painter = Self::with_genome(scene, genome)?;
        log::info!(
            "Initialized {} strokes (seed {}): error {}",
            stroke_count,
            seed,
            painter.error
        );
        Ok(painter)
    }

    /// Adopt an existing genome after checking every stroke against the
    /// scene's domain.
    pub fn from_genome(scene: Arc<Scene>, genome: Genome) -> Result<Self, PaintError> {
        for (index, gene) in genome.iter().enumerate() {
            gene.validate(index, scene.config(), scene.width(), scene.height())?;
        }
        Self::with_genome(scene, genome)
    }

    fn with_genome(scene: Arc<Scene>, genome: Genome) -> Result<Self, PaintError> {
        let image = scene.renderer().render(&genome)?;
        let error = absolute_error(&image, scene.target());
        Ok(Self {
            scene,
            genome,
            error,
            image,
        })
    }

    #[inline]
    pub fn scene(&self) -> &Arc<Scene> {
        &self.scene
    }

    #[inline]
    pub fn genome(&self) -> &[Gene] {
        &self.genome
    }

    /// Current error against the target.
    #[inline]
    pub fn error(&self) -> u64 {
        self.error
    }

    /// Current rendered canvas.
    #[inline]
    pub fn image(&self) -> &GrayImage {
        &self.image
    }

    pub fn into_genome(self) -> Genome {
        self.genome
    }

    /// Mutated copy of stroke `index` for the pass keyed by `seed`.
    ///
    /// Does not touch the genome.
    pub fn propose(&self, index: usize, seed: u64) -> Gene {
        let (fields, mut stream) = select_fields(seed, index);
        let domain = self.scene.domain();

        let mut gene = self.genome[index];
        for field in fields {
            stream.mutate_field(&mut gene, field, &domain);
        }
        gene
    }

    /// One mutation attempt per stroke, first to last.
    ///
    /// Each attempt is rendered and scored against the cache left by the
    /// previous one, and kept only if it strictly lowers the error. On error
    /// the pass stops; mutations accepted before it stay committed.
    pub fn evolve_once(&mut self, seed: u64) -> Result<PassReport, PaintError> {
        let scene = Arc::clone(&self.scene);
        let renderer = scene.renderer();

        // Genes 0..index composited onto the padded base
        let mut prefix = scene.config().incremental.then(|| renderer.padded_base());
        let mut accepted = 0;

        for index in 0..self.genome.len() {
            let candidate = self.propose(index, seed);

            let image = match &prefix {
                Some(prefix) => self.render_from(&renderer, prefix, index, &candidate)?,
                None => {
                    let mut genes = self.genome.clone();
                    genes[index] = candidate;
                    renderer.render(&genes)?
                }
            };
            let error = absolute_error(&image, scene.target());

            if error < self.error {
                log::trace!(
                    "Stroke {} accepted: error {} -> {}",
                    index,
                    self.error,
                    error
                );
                self.genome[index] = candidate;
                self.error = error;
                self.image = image;
                accepted += 1;
            }

            if let Some(prefix) = prefix.as_mut() {
                renderer.paint(prefix, index, &self.genome[index])?;
            }
        }

        log::debug!(
            "Pass with seed {}: {}/{} mutations accepted, error {}",
            seed,
            accepted,
            self.genome.len(),
            self.error
        );

        Ok(PassReport {
            accepted,
            error: self.error,
        })
    }

    /// Render `candidate` in place of stroke `index` on top of the prefix
    /// holding strokes `0..index`.
    fn render_from(
        &self,
        renderer: &Renderer<'_>,
        prefix: &GrayImage,
        index: usize,
        candidate: &Gene,
    ) -> Result<GrayImage, PaintError> {
        let mut padded = prefix.clone();
        renderer.paint(&mut padded, index, candidate)?;
        for (offset, gene) in self.genome[index + 1..].iter().enumerate() {
            renderer.paint(&mut padded, index + 1 + offset, gene)?;
        }
        Ok(renderer.unpad(&padded))
    }
}
