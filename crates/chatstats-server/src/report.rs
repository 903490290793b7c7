use chatstats_core::stats::SenderCount;
use minijinja::{context, Environment};

/// Template environment with the embedded stats page.
pub fn environment() -> Result<Environment<'static>, minijinja::Error> {
    let mut env = Environment::new();
    env.add_template("stats.html", include_str!("../templates/stats.html"))?;
    Ok(env)
}

pub struct StatsPage<'a> {
    pub topics: &'a [String],
    /// None when no topic is selected; the page then only lists topics.
    pub results: Option<&'a [SenderCount]>,
    pub start_date: Option<&'a str>,
    pub end_date: Option<&'a str>,
    pub selected_topic: Option<&'a str>,
}

pub fn render_stats(
    env: &Environment<'_>,
    page: &StatsPage<'_>,
) -> Result<String, minijinja::Error> {
    let template = env.get_template("stats.html")?;
    template.render(context! {
        topics => page.topics,
        results => page.results,
        start_date => page.start_date,
        end_date => page.end_date,
        selected_topic => page.selected_topic,
    })
}
