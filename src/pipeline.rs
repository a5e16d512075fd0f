//! One fetch, draw and post cycle.
//!
//! Fetching events and posting images are left to the caller through [`EventSource`] and
//! [`Publisher`]. The pipeline picks the week, filters and orders the events, and decides
//! between posting a fresh image and removing the installation when the week is empty.

use alloc::vec::Vec;
use core::fmt;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use embedded_graphics::prelude::PixelColor;
use log::{debug, error, info};

use crate::{
    calendar_utils::{TimeSpan, WeekWindow},
    canvas::{Canvas, TIDBYT_SIZE},
    config::FreeBusyConfig,
    draw::{draw_week_header, WeekRenderer},
};

/// Where busy intervals come from
pub trait EventSource {
    type Event: TimeSpan;
    type Error: fmt::Debug;

    /// Events of `calendar_id` overlapping `start..end`
    fn fetch(
        &mut self,
        calendar_id: &str,
        start: &DateTime<Tz>,
        end: &DateTime<Tz>,
    ) -> Result<Vec<Self::Event>, Self::Error>;
}

/// Where finished images go
pub trait Publisher<C> {
    type Error: fmt::Debug;

    fn publish(
        &mut self,
        canvas: &Canvas<C>,
        installation_id: &str,
        image_name: &str,
    ) -> Result<(), Self::Error>;

    /// Take the installation off the display, used when there is nothing to show
    fn remove_installation(&mut self, installation_id: &str) -> Result<(), Self::Error>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Published { events: usize },
    Removed,
}

#[derive(Debug)]
pub enum PipelineError<S, P> {
    /// The local timezone skips midnight on the current day
    NoLocalMidnight,
    Fetch(S),
    Publish(P),
}

impl<S: fmt::Debug, P: fmt::Debug> fmt::Display for PipelineError<S, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoLocalMidnight => write!(f, "local midnight does not exist today"),
            Self::Fetch(e) => write!(f, "failed to fetch events: {e:?}"),
            Self::Publish(e) => write!(f, "failed to publish: {e:?}"),
        }
    }
}

/// Render the week containing `now` and post it, or remove the installation if the week is free
pub fn run_once<S, P, C>(
    now: DateTime<Utc>,
    source: &mut S,
    publisher: &mut P,
    config: &FreeBusyConfig<C>,
) -> Result<Outcome, PipelineError<S::Error, P::Error>>
where
    S: EventSource,
    P: Publisher<C>,
    C: PixelColor,
{
    let local_now = now.with_timezone(&config.local_tz);
    let window = WeekWindow::containing(&local_now)
        .ok_or(PipelineError::<S::Error, P::Error>::NoLocalMidnight)
        .inspect_err(|_e| error!("No local midnight on {}", local_now.date_naive()))?;
    let (start, end) = window.fetch_range();

    let mut events = source
        .fetch(&config.calendar_id, &start, &end)
        .inspect_err(|e| error!("Failed to fetch events from {}: {e:?}", config.calendar_id))
        .map_err(PipelineError::<S::Error, P::Error>::Fetch)?;
    let fetched = events.len();
    events.retain(|event| window.overlaps(event));
    if events.len() != fetched {
        debug!("dropped {} events outside of the week", fetched - events.len());
    }
    events.sort_by_key(|event| event.start_utc());

    if events.is_empty() {
        debug!("no events to post");
        publisher
            .remove_installation(&config.installation_id)
            .inspect_err(|e| error!("Failed to remove installation: {e:?}"))
            .map_err(PipelineError::<S::Error, P::Error>::Publish)?;
        return Ok(Outcome::Removed);
    }

    debug!("posting {} events to {}", events.len(), config.installation_id);
    let mut canvas = Canvas::new(TIDBYT_SIZE, config.style.background);
    let renderer = WeekRenderer::new(config.style);
    draw_week_header(&mut canvas, &window, config.style.label)
        .and_then(|()| renderer.render(&mut canvas, &events, &window))
        .unwrap_or_else(|never| match never {});

    publisher
        .publish(&canvas, &config.installation_id, &config.image_name)
        .inspect_err(|e| error!("Failed to publish image: {e:?}"))
        .map_err(PipelineError::<S::Error, P::Error>::Publish)?;
    info!(
        "Published {} busy intervals for the week of {}",
        events.len(),
        window.start().date_naive()
    );
    Ok(Outcome::Published {
        events: events.len(),
    })
}
