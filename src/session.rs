//! Control boundary: holds the accepted config and the cached point field,
//! and turns regenerate requests into new geometry.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::GenerationConfig;
use crate::error::Result;
use crate::graph::{self, EdgeList};
use crate::points::{self, Point, PointField};
use crate::render::GeometrySink;

pub struct Session<R = StdRng> {
    config: GenerationConfig,
    rng: R,
    points: PointField,
    edges: EdgeList,
    /// Queued request; the flag is whether a fresh point field is forced.
    pending: Option<bool>,
}

impl Session<StdRng> {
    /// Seeds the jitter source from `config.seed`, or from the OS when unset.
    pub fn new(config: GenerationConfig) -> Result<Self> {
        let rng = config
            .seed
            .map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);
        Self::with_rng(config, rng)
    }
}

impl<R: Rng> Session<R> {
    pub fn with_rng(config: GenerationConfig, rng: R) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            rng,
            points: Vec::new(),
            edges: EdgeList::default(),
            pending: None,
        })
    }

    #[must_use]
    pub const fn config(&self) -> &GenerationConfig {
        &self.config
    }

    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    #[must_use]
    pub const fn current_edge_list(&self) -> &EdgeList {
        &self.edges
    }

    #[must_use]
    pub const fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Accepts `config` if it validates and queues a rebuild. On error the
    /// previous config, points and edges stay in place.
    ///
    /// `config.seed` is only read by [`Session::new`]; the running jitter
    /// source is not reseeded here.
    pub fn apply_config(&mut self, config: GenerationConfig) -> Result<()> {
        if let Err(err) = config.validate() {
            log::warn!("rejected config change: {err}");
            return Err(err);
        }
        self.config = config;
        self.request_regenerate(false);
        Ok(())
    }

    /// Sets one named field, as a slider or toggle would.
    pub fn set_field(&mut self, field: &str, value: &str) -> Result<()> {
        match self.config.with_field(field, value) {
            Ok(next) => self.apply_config(next),
            Err(err) => {
                log::warn!("rejected `{field} = {value}`: {err}");
                Err(err)
            }
        }
    }

    pub fn set_regenerate_on_change(&mut self, enabled: bool) {
        self.config.regenerate_on_change = enabled;
    }

    /// Queues a rebuild. A newer request replaces a queued one, but a queued
    /// forced point regeneration is kept.
    pub fn request_regenerate(&mut self, force_point_regen: bool) {
        let force = self.pending.unwrap_or(false) || force_point_regen;
        if self.pending.replace(force).is_some() {
            log::trace!("superseded queued regenerate request");
        }
    }

    /// Runs the queued request, if any, and hands the result to `sink`.
    /// Returns whether anything was rebuilt.
    pub fn process<S: GeometrySink + ?Sized>(&mut self, sink: &mut S) -> bool {
        let Some(force) = self.pending.take() else {
            return false;
        };
        self.rebuild(force);
        sink.replace_geometry(&self.edges);
        true
    }

    /// Queues and immediately processes a request.
    pub fn regenerate<S: GeometrySink + ?Sized>(&mut self, force_point_regen: bool, sink: &mut S) {
        self.request_regenerate(force_point_regen);
        self.process(sink);
    }

    fn rebuild(&mut self, force: bool) {
        if force || self.config.regenerate_on_change || self.points.is_empty() {
            self.points = points::generate(&self.config, &mut self.rng);
        } else {
            log::debug!("reusing cached field of {} points", self.points.len());
        }
        self.edges = graph::build_with(&self.points, &self.config);
        log::info!(
            "geometry rebuilt: {} points, {} edges{}",
            self.points.len(),
            self.edges.len(),
            if self.edges.limit_reached() { " (limit reached)" } else { "" }
        );
    }
}
