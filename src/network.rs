//! Share URL builders, one per supported network.
//!
//! The registry is a fixed table keyed by [`Network`]. Each builder takes
//! already-encoded [`ShareMetadata`] and concatenates it into the network's
//! share endpoint. Optional segments are appended only for non-empty fields.
//!
//! Some networks take a single message body instead of separate parameters;
//! for those the title, url and extras are joined with a literal `%0D%0A`
//! line break. Which networks do this, and with how many breaks, is specific
//! to each service.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;
use crate::metadata::ShareMetadata;

/// Encoded CRLF used as a line break inside message bodies.
const BREAK: &str = "%0D%0A";

/// Compose endpoint for the mastodon button.
const MASTODON_INSTANCE: &str = "https://toot.karamoff.dev/";

/// A supported share target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
#[cfg_attr(feature = "cli", serde(rename_all = "lowercase"))]
pub enum Network {
    Facebook,
    Linkedin,
    Mastodon,
    Messenger,
    Odnoklassniki,
    Pinterest,
    Pocket,
    Reddit,
    Telegram,
    Twitter,
    Viber,
    Vkontakte,
    Whatsapp,
}

type Builder = fn(&ShareMetadata) -> String;

/// Registry rows: identifier, fixed endpoint prefix, builder.
static REGISTRY: [(Network, &str, &str, Builder); 13] = [
    (
        Network::Facebook,
        "facebook",
        "https://www.facebook.com/sharer/sharer.php?u=",
        facebook,
    ),
    (
        Network::Linkedin,
        "linkedin",
        "https://www.linkedin.com/sharing/share-offsite/?url=",
        linkedin,
    ),
    (
        Network::Mastodon,
        "mastodon",
        "https://toot.karamoff.dev/?text=",
        mastodon,
    ),
    (
        Network::Messenger,
        "messenger",
        "https://www.facebook.com/dialog/send?app_id=",
        messenger,
    ),
    (
        Network::Odnoklassniki,
        "odnoklassniki",
        "https://connect.ok.ru/offer?url=",
        odnoklassniki,
    ),
    (
        Network::Pinterest,
        "pinterest",
        "https://pinterest.com/pin/create/button/?url=",
        pinterest,
    ),
    (
        Network::Pocket,
        "pocket",
        "https://getpocket.com/edit.php?url=",
        pocket,
    ),
    (
        Network::Reddit,
        "reddit",
        "https://www.reddit.com/submit?title=",
        reddit,
    ),
    (
        Network::Telegram,
        "telegram",
        "https://telegram.me/share/url?url=",
        telegram,
    ),
    (
        Network::Twitter,
        "twitter",
        "https://twitter.com/intent/tweet?url=",
        twitter,
    ),
    (Network::Viber, "viber", "viber://forward?text=", viber),
    (
        Network::Vkontakte,
        "vkontakte",
        "https://vk.com/share.php?url=",
        vkontakte,
    ),
    (Network::Whatsapp, "whatsapp", "https://wa.me/?text=", whatsapp),
];

impl Network {
    /// Every network, in identifier order.
    pub const ALL: [Network; 13] = [
        Network::Facebook,
        Network::Linkedin,
        Network::Mastodon,
        Network::Messenger,
        Network::Odnoklassniki,
        Network::Pinterest,
        Network::Pocket,
        Network::Reddit,
        Network::Telegram,
        Network::Twitter,
        Network::Viber,
        Network::Vkontakte,
        Network::Whatsapp,
    ];

    /// Look up a network by its class name / identifier.
    ///
    /// Matching is exact and case-sensitive, like a class list lookup.
    ///
    /// # Examples
    ///
    /// ```
    /// use shareon::Network;
    ///
    /// assert_eq!(Network::from_id("twitter"), Some(Network::Twitter));
    /// assert_eq!(Network::from_id("Twitter"), None);
    /// assert_eq!(Network::from_id("myspace"), None);
    /// ```
    pub fn from_id(id: &str) -> Option<Network> {
        REGISTRY
            .iter()
            .find(|(_, key, _, _)| *key == id)
            .map(|(network, ..)| *network)
    }

    fn row(self) -> &'static (Network, &'static str, &'static str, Builder) {
        &REGISTRY[self as usize]
    }

    /// Identifier used as the button's class name.
    pub fn id(self) -> &'static str {
        self.row().1
    }

    /// Fixed prefix every URL built for this network starts with.
    pub fn endpoint(self) -> &'static str {
        self.row().2
    }

    /// Build the share URL. Never fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use shareon::{Network, ShareMetadata};
    ///
    /// let meta = ShareMetadata::encoded("https://example.com", "Hello World");
    /// assert_eq!(
    ///     Network::Twitter.build(&meta),
    ///     "https://twitter.com/intent/tweet?url=https%3A%2F%2Fexample.com&text=Hello%20World"
    /// );
    /// ```
    pub fn build(self, meta: &ShareMetadata) -> String {
        (self.row().3)(meta)
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Network {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Network::from_id(s).ok_or_else(|| Error::UnknownNetwork(s.to_string()))
    }
}

/// `{prefix}{value}` when `value` is non-empty, otherwise nothing.
fn optional(prefix: &str, value: &str) -> String {
    if value.is_empty() {
        String::new()
    } else {
        format!("{prefix}{value}")
    }
}

/// `title BREAK url` followed by `BREAK BREAK extra` for each non-empty extra.
fn message_body(meta: &ShareMetadata, extras: &[&str]) -> String {
    let mut body = format!("{}{BREAK}{}", meta.title, meta.url);
    for extra in extras.iter().filter(|e| !e.is_empty()) {
        body.push_str(BREAK);
        body.push_str(BREAK);
        body.push_str(extra);
    }
    body
}

fn facebook(m: &ShareMetadata) -> String {
    format!("https://www.facebook.com/sharer/sharer.php?u={}", m.url)
}

fn linkedin(m: &ShareMetadata) -> String {
    format!(
        "https://www.linkedin.com/sharing/share-offsite/?url={}",
        m.url
    )
}

fn mastodon(m: &ShareMetadata) -> String {
    format!(
        "{MASTODON_INSTANCE}?text={}",
        message_body(m, &[m.text.as_str(), m.via.as_str()])
    )
}

fn messenger(m: &ShareMetadata) -> String {
    format!(
        "https://www.facebook.com/dialog/send?app_id={}&link={}&redirect_uri={}",
        m.fb_app_id, m.url, m.url
    )
}

fn odnoklassniki(m: &ShareMetadata) -> String {
    format!(
        "https://connect.ok.ru/offer?url={}&title={}{}",
        m.url,
        m.title,
        optional("&imageUrl=", &m.media)
    )
}

fn pinterest(m: &ShareMetadata) -> String {
    format!(
        "https://pinterest.com/pin/create/button/?url={}&description={}{}",
        m.url,
        m.title,
        optional("&media=", &m.media)
    )
}

fn pocket(m: &ShareMetadata) -> String {
    format!("https://getpocket.com/edit.php?url={}", m.url)
}

fn reddit(m: &ShareMetadata) -> String {
    format!(
        "https://www.reddit.com/submit?title={}&url={}",
        m.title, m.url
    )
}

fn telegram(m: &ShareMetadata) -> String {
    format!(
        "https://telegram.me/share/url?url={}{}",
        m.url,
        optional("&text=", &m.text)
    )
}

fn twitter(m: &ShareMetadata) -> String {
    format!(
        "https://twitter.com/intent/tweet?url={}&text={}{}",
        m.url,
        m.title,
        optional("&via=", &m.via)
    )
}

fn viber(m: &ShareMetadata) -> String {
    format!("viber://forward?text={}", message_body(m, &[m.text.as_str()]))
}

fn vkontakte(m: &ShareMetadata) -> String {
    format!(
        "https://vk.com/share.php?url={}&title={}{}",
        m.url,
        m.title,
        optional("&image=", &m.media)
    )
}

fn whatsapp(m: &ShareMetadata) -> String {
    format!("https://wa.me/?text={}", message_body(m, &[m.text.as_str()]))
}
