use anyhow::Result;

use super::{PlanData, PlanParser};

/// Renders the TypeScript-shaped snippets that get pasted into the
/// application seed file. Nothing in this repository consumes them; they
/// exist for manual copy-paste.

/// The `const videoIds` block printed after parsing a dump.
pub fn render_video_ids(parser: &PlanParser, data: &PlanData) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "// Video IDs for Days {}-{}\n",
        parser.day_start(),
        parser.day_end()
    ));
    out.push_str("const videoIds: { [key: number]: string } = {\n");

    for (day, record) in &data.days {
        out.push_str(&format!("  {}: '{}',\n", day, record.video_id));
    }

    out.push_str("}\n");
    out
}

/// The readings array block printed after parsing a dump. Each day's
/// passages are re-derived from its raw description and embedded as
/// compact JSON.
pub fn render_readings(parser: &PlanParser, data: &PlanData) -> Result<String> {
    let mut out = String::new();
    out.push_str(&format!(
        "\n\n// Reading data for Days {}-{}\n",
        parser.day_start(),
        parser.day_end()
    ));
    out.push_str(&format!(
        "const bibleRecapReadings{}to{} = [\n",
        parser.day_start(),
        parser.day_end()
    ));

    for (day, record) in &data.days {
        let passages = parser.parse_passages(*day, &record.passages_str);
        out.push_str(&format!(
            "  {{ day: {}, title: '{}', passages: {} }},\n",
            day,
            record.title,
            serde_json::to_string(&passages)?
        ));
    }

    out.push_str("];\n");
    Ok(out)
}

/// The video-id additions for the existing seed file, indented to slot
/// into the videoIds object after day 30.
pub fn render_seed_video_ids(data: &PlanData) -> String {
    let mut out = String::new();
    out.push_str("// Add these to videoIds object (after day 30):\n");

    for (day, video_id) in &data.video_ids {
        out.push_str(&format!("    {}: '{}',\n", day, video_id));
    }

    out
}

/// The reading entries for the existing seed file, indented to slot into
/// the bibleRecapReadings array after day 30.
pub fn render_seed_readings(parser: &PlanParser, data: &PlanData) -> Result<String> {
    let mut out = String::new();
    out.push_str("\n\n// Add these readings after day 30 in bibleRecapReadings array:\n");

    for (day, record) in &data.days {
        let passages = parser.parse_passages(*day, &record.passages_str);
        out.push_str(&format!(
            "    {{ day: {}, title: '{}', passages: {} }},\n",
            day,
            record.title,
            serde_json::to_string(&passages)?
        ));
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlanConfig;

    fn parser() -> PlanParser {
        PlanParser::new(&PlanConfig {
            day_start: 31,
            day_end: 91,
        })
    }

    fn sample_data() -> PlanData {
        let parser = parser();
        parser.parse_dump(concat!(
            "037:MWXH-0z3Cbw:Day 031 (Exodus 4-6)\n",
            "049:abcdefghijk:Day 043 (Numbers 14-15, Psalm 90)\n",
        ))
    }

    #[test]
    fn test_render_video_ids() {
        let snippet = render_video_ids(&parser(), &sample_data());

        assert!(snippet.starts_with("// Video IDs for Days 31-91\n"));
        assert!(snippet.contains("const videoIds: { [key: number]: string } = {\n"));
        assert!(snippet.contains("  31: 'MWXH-0z3Cbw',\n"));
        assert!(snippet.contains("  43: 'abcdefghijk',\n"));
        assert!(snippet.ends_with("}\n"));

        // Ascending day order
        let day_31 = snippet.find("31: ").unwrap();
        let day_43 = snippet.find("43: ").unwrap();
        assert!(day_31 < day_43);
    }

    #[test]
    fn test_render_readings() {
        let snippet = render_readings(&parser(), &sample_data()).unwrap();

        assert!(snippet.contains("const bibleRecapReadings31to91 = [\n"));
        assert!(snippet.contains("{ day: 31, title: 'Day 31: Exodus 4-6', passages: ["));
        assert!(snippet.contains("\"book\":\"Exodus\",\"chapter\":4,\"verseStart\":1,\"verseEnd\":null"));
        assert!(snippet.contains("Day 43 reading from Numbers 14-15, Psalm 90"));
        assert!(snippet.ends_with("];\n"));
    }

    #[test]
    fn test_render_seed_update_blocks() {
        let data = sample_data();
        let ids = render_seed_video_ids(&data);
        let readings = render_seed_readings(&parser(), &data).unwrap();

        assert!(ids.starts_with("// Add these to videoIds object (after day 30):\n"));
        assert!(ids.contains("    31: 'MWXH-0z3Cbw',\n"));
        assert!(readings.contains("    { day: 43, title: 'Day 43: Numbers 14-15, Psalm 90', passages: ["));
    }
}
