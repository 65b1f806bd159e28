//! Dashboard routes: the index page and the `ajax.php` text endpoints

use crate::core::error::AssetError;
use crate::core::fs::FileSystem;
use crate::static_files::{respond, HttpResponse};
use bytes::Bytes;
use chrono::{DateTime, Local, TimeDelta, TimeZone};
use hyper::StatusCode;
use percent_encoding::percent_decode_str;
use std::fmt::Display;
use std::io;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Markup served at `/`
pub const INDEX_PATH: &str = "/assets/index.html";

const PROC_UPTIME: &str = "/proc/uptime";

pub struct Dashboard {
    index: Bytes,
    started: Instant,
}

impl Dashboard {
    /// Read the index markup once. A failure here is a startup error.
    pub fn load<F: FileSystem + ?Sized>(fs: &F) -> Result<Self, AssetError> {
        let index = fs.read_string(INDEX_PATH)?;
        info!("Loaded dashboard page {} ({} bytes)", INDEX_PATH, index.len());

        Ok(Dashboard {
            index: Bytes::from(index),
            started: Instant::now(),
        })
    }

    pub fn index(&self) -> HttpResponse {
        respond(
            StatusCode::OK,
            Some(&mime::TEXT_HTML_UTF_8),
            self.index.clone(),
        )
    }

    /// `GET /script/ajax.php?action=...`
    pub fn ajax(&self, query: Option<&str>) -> HttpResponse {
        let body = match query_param(query, "action").as_deref() {
            Some("time") => format_time(Local::now(), self.uptime()),
            Some("uptime") => format_uptime(self.uptime()),
            other => {
                debug!("Ignoring ajax action {:?}", other);
                return respond(StatusCode::NO_CONTENT, None, Bytes::new());
            }
        };

        respond(
            StatusCode::OK,
            Some(&mime::TEXT_PLAIN_UTF_8),
            Bytes::from(body),
        )
    }

    /// Host uptime, or the process uptime when the host's is unavailable
    fn uptime(&self) -> Duration {
        match host_uptime() {
            Ok(uptime) => uptime,
            Err(e) => {
                warn!("Host uptime unavailable ({}), reporting process uptime", e);
                self.started.elapsed()
            }
        }
    }
}

pub fn host_uptime() -> io::Result<Duration> {
    let contents = std::fs::read_to_string(PROC_UPTIME)?;
    parse_proc_uptime(&contents)
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidData, "malformed /proc/uptime"))
}

/// First field of `/proc/uptime`: seconds since boot, fractional
pub fn parse_proc_uptime(contents: &str) -> Option<Duration> {
    let seconds: f64 = contents.split_whitespace().next()?.parse().ok()?;
    if !seconds.is_finite() || seconds < 0.0 {
        return None;
    }
    Some(Duration::from_secs_f64(seconds))
}

/// `"<today>;<clock>;<boot day>"`, e.g. `"February 17, 2016;5:51 pm;February 3, 2016"`
pub fn format_time<Tz>(now: DateTime<Tz>, uptime: Duration) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let since = TimeDelta::from_std(uptime).unwrap_or(TimeDelta::zero());
    let booted = now.clone() - since;
    format!(
        "{};{};{}",
        now.format("%B %-d, %Y"),
        now.format("%-I:%M %P"),
        booted.format("%B %-d, %Y")
    )
}

/// `"<days>;<hours>;<minutes>"`
pub fn format_uptime(uptime: Duration) -> String {
    let total = uptime.as_secs();
    let days = total / 86_400;
    let hours = (total / 3_600) % 24;
    let minutes = (total / 60) % 60;
    format!("{};{};{}", days, hours, minutes)
}

/// Form-decoded value of `key` in a query string
fn query_param(query: Option<&str>, key: &str) -> Option<String> {
    query?.split('&').find_map(|pair| {
        let (k, v) = pair.split_once('=').unwrap_or((pair, ""));
        (form_decode(k) == key).then(|| form_decode(v))
    })
}

fn form_decode(component: &str) -> String {
    let spaced = component.replace('+', " ");
    percent_decode_str(&spaced).decode_utf8_lossy().into_owned()
}
