//! Shared fixtures for unit tests.

use super::model::*;

fn theme(bg: &str, accent: &str, text: &str, wave: &str) -> Theme {
    Theme {
        bg: bg.to_string(),
        accent: accent.to_string(),
        text: text.to_string(),
        wave: wave.to_string(),
    }
}

fn milestone(id: &str, stage: Stage, title: &str, phrase: &str, theme: Theme) -> Milestone {
    Milestone {
        id: id.to_string(),
        stage,
        date: format!("{} date", id),
        title: title.to_string(),
        description: format!("{title} description"),
        phrase: phrase.to_string(),
        images: vec![format!("img/{id}.jpg")],
        theme,
    }
}

pub(crate) fn sample_captions() -> Vec<CaptionLine> {
    [
        ("If the world was ending", 0.5),
        ("I'd wanna be next to you", 3.2),
        ("If the party was over", 6.8),
        ("And our time on Earth was through", 9.5),
        ("I'd wanna hold you just for a while", 13.8),
        ("And die with a smile", 18.2),
    ]
    .into_iter()
    .map(|(text, ts)| CaptionLine::new(text, ts))
    .collect()
}

pub(crate) fn sample_story() -> Storybook {
    Storybook {
        title: "Our love to Admire".to_string(),
        audio: Audio {
            url: "song.mp3".to_string(),
            artist: "Artist".to_string(),
            song: "Song".to_string(),
            looping: true,
        },
        gallery: vec!["g1.jpg".to_string(), "g2.jpg".to_string(), "g3.jpg".to_string()],
        milestones: vec![
            milestone("intro", Stage::Inicio, "Our love to Admire", "If the world was ending", theme("#F7FBF2", "#82A078", "#2D2926", "#A8C69F")),
            milestone("encuentro", Stage::Encuentro, "El Choque de Dos Mundos", "If the party was over", theme("#FDF2F7", "#D97B93", "#1A1C1E", "#D97B93")),
            milestone("crecimiento", Stage::Crecimiento, "Navegando Juntos", "I'd wanna hold you", theme("#FFFDF0", "#D4A017", "#2D2926", "#E9C46A")),
            milestone("consolidacion", Stage::Consolidacion, "Donde Echamos el Ancla", "And die with a smile", theme("#FAF3E0", "#BC6C25", "#1A1C1E", "#DDA15E")),
            milestone("presente", Stage::Presente, "Nuestra Realidad", "Right next to you", theme("#F0F7FA", "#2A9D8F", "#1A1C1E", "#A8DADC")),
            milestone("futuro", Stage::Futuro, "Nuevos Horizontes", "Wherever you go", theme("#064e3b", "#52B788", "#FDF8F1", "#E8F3E8")),
        ],
        captions: sample_captions(),
        cover: Cover::default(),
        encounter: EncounterConfig::default(),
        settings: Settings::default(),
    }
}
