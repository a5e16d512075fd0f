use chrono::{DateTime, TimeZone, Utc};
use chrono_tz::Tz;
use embedded_graphics::{
    image::GetPixel,
    pixelcolor::{Rgb888, RgbColor},
    prelude::*,
};
use freebusy_week::{
    run_once, BusyInterval, Canvas, EventSource, FreeBusyConfig, Outcome, PipelineError,
    Publisher,
};

#[derive(Default)]
struct FakeSource {
    events: Vec<BusyInterval<Utc>>,
    fail: bool,
    requests: Vec<(String, DateTime<Tz>, DateTime<Tz>)>,
}

impl EventSource for FakeSource {
    type Event = BusyInterval<Utc>;
    type Error = &'static str;

    fn fetch(
        &mut self,
        calendar_id: &str,
        start: &DateTime<Tz>,
        end: &DateTime<Tz>,
    ) -> Result<Vec<Self::Event>, Self::Error> {
        self.requests
            .push((calendar_id.to_string(), *start, *end));
        if self.fail {
            return Err("calendar unavailable");
        }
        Ok(self.events.clone())
    }
}

#[derive(Default)]
struct FakePublisher {
    published: Vec<(Canvas<Rgb888>, String, String)>,
    removed: Vec<String>,
}

impl Publisher<Rgb888> for FakePublisher {
    type Error = &'static str;

    fn publish(
        &mut self,
        canvas: &Canvas<Rgb888>,
        installation_id: &str,
        image_name: &str,
    ) -> Result<(), Self::Error> {
        self.published.push((
            canvas.clone(),
            installation_id.to_string(),
            image_name.to_string(),
        ));
        Ok(())
    }

    fn remove_installation(&mut self, installation_id: &str) -> Result<(), Self::Error> {
        self.removed.push(installation_id.to_string());
        Ok(())
    }
}

const BLOCK: Rgb888 = Rgb888::new(0x5e, 0x2b, 0xff);

fn config() -> FreeBusyConfig<Rgb888> {
    FreeBusyConfig::new("shifts@example.com", "freebusy", BLOCK)
        .with_local_tz(chrono_tz::Europe::Moscow)
}

fn utc(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, day, hour, 0, 0).unwrap()
}

#[test]
fn asks_for_the_local_week() {
    let mut source = FakeSource::default();
    let mut publisher = FakePublisher::default();

    // 22:30 UTC on Monday is already Tuesday in Moscow
    run_once(
        Utc.with_ymd_and_hms(2024, 1, 1, 22, 30, 0).unwrap(),
        &mut source,
        &mut publisher,
        &config(),
    )
    .unwrap();

    let (calendar, start, end) = &source.requests[0];
    assert_eq!(calendar, "shifts@example.com");
    assert_eq!(start.naive_local().to_string(), "2024-01-02 00:00:00");
    assert_eq!(end.naive_local().to_string(), "2024-01-09 00:00:00");
}

#[test]
fn empty_week_removes_the_installation() {
    let mut source = FakeSource::default();
    let mut publisher = FakePublisher::default();

    let outcome = run_once(utc(1, 12), &mut source, &mut publisher, &config()).unwrap();

    assert_eq!(outcome, Outcome::Removed);
    assert_eq!(publisher.removed, ["freebusy"]);
    assert!(publisher.published.is_empty());
}

#[test]
fn events_outside_the_week_do_not_count() {
    let mut source = FakeSource {
        events: vec![
            BusyInterval::new(utc(10, 6), utc(10, 14)),
            BusyInterval::new(
                Utc.with_ymd_and_hms(2023, 12, 20, 6, 0, 0).unwrap(),
                Utc.with_ymd_and_hms(2023, 12, 20, 14, 0, 0).unwrap(),
            ),
        ],
        ..FakeSource::default()
    };
    let mut publisher = FakePublisher::default();

    let outcome = run_once(utc(1, 12), &mut source, &mut publisher, &config()).unwrap();
    assert_eq!(outcome, Outcome::Removed);
}

#[test]
fn busy_week_is_drawn_and_published() {
    // Moscow is UTC+3: these are Tuesday 09:00-17:00 and Monday 10:00-12:00 local time,
    // handed over out of order
    let mut source = FakeSource {
        events: vec![
            BusyInterval::new(utc(2, 6), utc(2, 14)),
            BusyInterval::new(utc(1, 7), utc(1, 9)),
            BusyInterval::new(utc(12, 6), utc(12, 7)),
        ],
        ..FakeSource::default()
    };
    let mut publisher = FakePublisher::default();

    let outcome = run_once(utc(1, 12), &mut source, &mut publisher, &config()).unwrap();
    assert_eq!(outcome, Outcome::Published { events: 2 });
    assert!(publisher.removed.is_empty());

    let (canvas, installation, image) = &publisher.published[0];
    assert_eq!(installation, "freebusy");
    assert_eq!(image, "working.gif");

    assert_eq!(canvas.pixel(Point::new(10, 17)), Some(BLOCK));
    assert_eq!(canvas.pixel(Point::new(17, 25)), Some(BLOCK));
    assert_eq!(canvas.pixel(Point::new(1, 18)), Some(BLOCK));
    assert_eq!(canvas.pixel(Point::new(8, 20)), Some(BLOCK));
    assert_eq!(canvas.pixel(Point::new(1, 21)), Some(Rgb888::BLACK));

    // day initials in the header band
    let header_lit = (0..64)
        .flat_map(|x| (0..8).map(move |y| Point::new(x, y)))
        .filter(|&p| canvas.pixel(p) == Some(Rgb888::WHITE))
        .count();
    assert!(header_lit > 0);
}

#[test]
fn fetch_failures_are_reported() {
    let mut source = FakeSource {
        fail: true,
        ..FakeSource::default()
    };
    let mut publisher = FakePublisher::default();

    let err = run_once(utc(1, 12), &mut source, &mut publisher, &config()).unwrap_err();
    assert!(matches!(err, PipelineError::Fetch("calendar unavailable")));
    assert_eq!(err.to_string(), "failed to fetch events: \"calendar unavailable\"");
    assert!(publisher.removed.is_empty());
    assert!(publisher.published.is_empty());
}
