//! Landing page. No backend calls.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feature {
    pub icon: &'static str,
    pub title: &'static str,
    pub body: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeView {
    pub headline: &'static str,
    pub tagline: &'static str,
    pub intro: &'static str,
    pub features: Vec<Feature>,
}

pub struct Home;

impl Home {
    pub fn view() -> HomeView {
        HomeView {
            headline: "Backstage Stories",
            tagline: "Share your thoughts and stories about performances",
            intro: "From interpreting open endings to discussing memorable scenes, \
                    engage in deep conversations with other audience members. \
                    Enjoy performances on a whole new level.",
            features: vec![
                Feature {
                    icon: "🎭",
                    title: "Performance Info",
                    body: "Check information about various performances, \
                           and share reviews and discussions.",
                },
                Feature {
                    icon: "💬",
                    title: "Discussions & Comments",
                    body: "Share your interpretations of open endings, \
                           and opinions about memorable scenes.",
                },
                Feature {
                    icon: "👍",
                    title: "Voting & Reactions",
                    body: "Agree or disagree with opinions, \
                           and explore diverse perspectives.",
                },
            ],
        }
    }
}
