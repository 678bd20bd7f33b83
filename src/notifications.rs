//! Avisos transitoris a l'usuari.
//!
//! Cada avís es mostra 2 segons, s'esvaeix durant mig segon més i
//! després es retira. No hi ha temporitzadors: la fase es calcula contra
//! el rellotge quan el shell consulta els avisos actius.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Temps que un avís es mostra sencer.
pub const DISPLAY_DURATION: Duration = Duration::from_secs(2);

/// Durada de l'esvaïment abans de retirar l'avís.
pub const FADE_DURATION: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Info,
    Warning,
    Error,
}

impl NotificationKind {
    /// Classe CSS de l'avís (`custom-alert {kind}`).
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::Success => "success",
            NotificationKind::Info => "info",
            NotificationKind::Warning => "warning",
            NotificationKind::Error => "error",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationPhase {
    Visible,
    FadingOut,
    Expired,
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationKind,
    created_at: Instant,
}

impl Notification {
    fn new(message: String, kind: NotificationKind, created_at: Instant) -> Self {
        Self {
            message,
            kind,
            created_at,
        }
    }

    fn phase_at(&self, now: Instant) -> NotificationPhase {
        let elapsed = now.saturating_duration_since(self.created_at);
        if elapsed < DISPLAY_DURATION {
            NotificationPhase::Visible
        } else if elapsed < DISPLAY_DURATION + FADE_DURATION {
            NotificationPhase::FadingOut
        } else {
            NotificationPhase::Expired
        }
    }

    pub fn phase(&self) -> NotificationPhase {
        self.phase_at(Instant::now())
    }
}

/// Centre d'avisos compartit entre la cistella i les pàgines.
#[derive(Clone, Default)]
pub struct NotificationCenter {
    entries: Arc<Mutex<Vec<Notification>>>,
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publica un avís nou. No bloqueja mai el fil que el publica.
    pub fn push(&self, message: impl Into<String>, kind: NotificationKind) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.push(Notification::new(message.into(), kind, Instant::now()));
        }
    }

    /// Avisos encara vius, amb la seva fase; els expirats es retiren.
    pub fn active(&self) -> Vec<(Notification, NotificationPhase)> {
        self.active_at(Instant::now())
    }

    fn active_at(&self, now: Instant) -> Vec<(Notification, NotificationPhase)> {
        let Ok(mut entries) = self.entries.lock() else {
            return Vec::new();
        };

        entries.retain(|n| n.phase_at(now) != NotificationPhase::Expired);
        entries
            .iter()
            .map(|n| (n.clone(), n.phase_at(now)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn avis(creat: Instant) -> Notification {
        Notification::new("prova".into(), NotificationKind::Info, creat)
    }

    #[test]
    fn fases_segons_el_temps() {
        let creat = Instant::now();
        let n = avis(creat);

        assert_eq!(n.phase_at(creat), NotificationPhase::Visible);
        assert_eq!(
            n.phase_at(creat + Duration::from_millis(1_999)),
            NotificationPhase::Visible
        );
        assert_eq!(
            n.phase_at(creat + Duration::from_millis(2_100)),
            NotificationPhase::FadingOut
        );
        assert_eq!(
            n.phase_at(creat + Duration::from_millis(2_500)),
            NotificationPhase::Expired
        );
    }

    #[test]
    fn els_expirats_es_retiren_en_consultar() {
        let centre = NotificationCenter::new();
        centre.push("afegit!", NotificationKind::Success);

        let ara = Instant::now();
        assert_eq!(centre.active_at(ara).len(), 1);

        let mes_tard = ara + DISPLAY_DURATION + FADE_DURATION + Duration::from_millis(10);
        assert!(centre.active_at(mes_tard).is_empty());
        // i ja no tornen a aparèixer
        assert!(centre.active_at(ara + Duration::from_millis(1)).is_empty());
    }

    #[test]
    fn kind_com_a_classe_css() {
        assert_eq!(NotificationKind::Success.as_str(), "success");
        assert_eq!(NotificationKind::Error.as_str(), "error");
    }
}
