//! 번역 결과 줄바꿈 포매터.
//!
//! 설정된 문장 종결 부호(기본: 전각 마침표/물음표/느낌표) 뒤에
//! 줄바꿈을 삽입하여 표시용 텍스트를 만든다.

/// 기본 줄바꿈 종결 부호
pub const DEFAULT_BREAK_MARKS: &[char] = &['。', '？', '！'];

/// 종결 부호마다 바로 뒤에 `\n` 삽입
///
/// 순수 함수. 같은 입력에 항상 같은 출력을 내지만 멱등은 아니다 —
/// 이미 줄바꿈된 텍스트에 다시 적용하면 부호 뒤에 줄바꿈이 또 들어간다
/// (부호 앞 줄바꿈은 제거하지 않으므로 표시상 무해).
pub fn reflow(text: &str, marks: &[char]) -> String {
    let mut out = String::with_capacity(text.len() + 16);
    for ch in text.chars() {
        out.push(ch);
        if marks.contains(&ch) {
            out.push('\n');
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breaks_after_each_terminal_mark() {
        let out = reflow("A。B？C！", DEFAULT_BREAK_MARKS);
        assert_eq!(out, "A。\nB？\nC！\n");
    }

    #[test]
    fn no_marks_no_change() {
        assert_eq!(reflow("你好", DEFAULT_BREAK_MARKS), "你好");
        assert_eq!(reflow("", DEFAULT_BREAK_MARKS), "");
    }

    #[test]
    fn deterministic_on_same_input() {
        let input = "第一句。第二句？";
        let a = reflow(input, DEFAULT_BREAK_MARKS);
        let b = reflow(input, DEFAULT_BREAK_MARKS);
        assert_eq!(a, b);
        assert_eq!(a, "第一句。\n第二句？\n");
    }

    #[test]
    fn reapplication_inserts_again() {
        let once = reflow("完了。", DEFAULT_BREAK_MARKS);
        let twice = reflow(&once, DEFAULT_BREAK_MARKS);
        assert_eq!(once, "完了。\n");
        assert_eq!(twice, "完了。\n\n");
    }

    #[test]
    fn custom_marks() {
        let out = reflow("a.b.c", &['.']);
        assert_eq!(out, "a.\nb.\nc");
    }

    #[test]
    fn half_width_punctuation_untouched_by_default() {
        let out = reflow("Hello. World!", DEFAULT_BREAK_MARKS);
        assert_eq!(out, "Hello. World!");
    }
}
