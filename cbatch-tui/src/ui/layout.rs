use ratatui::layout::{Constraint, Layout, Rect};

const HEADER_HEIGHT: u16 = 3;
const FOOTER_HEIGHT: u16 = 3;
/// Directory bar and progress gauge share one bordered row height
const BAR_HEIGHT: u16 = 3;

/// Mode tabs on top, key help at the bottom, `body` rows in between
fn framed(area: Rect, body: &[Constraint]) -> Vec<Rect> {
    let mut rows = Vec::with_capacity(body.len() + 2);
    rows.push(Constraint::Length(HEADER_HEIGHT));
    rows.extend_from_slice(body);
    rows.push(Constraint::Length(FOOTER_HEIGHT));
    Layout::vertical(rows).split(area).to_vec()
}

/// Header, one content area, footer
pub fn create_layout(area: Rect) -> Vec<Rect> {
    framed(area, &[Constraint::Min(1)])
}

/// Header, jobs directory bar, job list, footer
pub fn create_list_layout(area: Rect) -> Vec<Rect> {
    framed(area, &[Constraint::Length(BAR_HEIGHT), Constraint::Min(1)])
}

/// Header, progress gauge, jobs and output, footer
pub fn create_execution_layout(area: Rect) -> Vec<Rect> {
    create_list_layout(area)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_layout_gives_the_rest_to_jobs() {
        let rows = create_list_layout(Rect::new(0, 0, 80, 24));
        let heights: Vec<u16> = rows.iter().map(|r| r.height).collect();
        assert_eq!(heights, vec![3, 3, 15, 3]);
        assert_eq!(rows[3].bottom(), 24);
    }

    #[test]
    fn test_plain_layout_has_three_rows() {
        let rows = create_layout(Rect::new(0, 0, 40, 10));
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1].height, 4);
    }
}
