use crate::string_enum;

string_enum! {
    /// 年级（小学 P1-P6，初中 J1-J3）
    #[ts(export, export_to = "common.ts")]
    pub enum ClassLevel("年级") {
        P1 => "P1",
        P2 => "P2",
        P3 => "P3",
        P4 => "P4",
        P5 => "P5",
        P6 => "P6",
        J1 => "J1",
        J2 => "J2",
        J3 => "J3",
    }
}

impl ClassLevel {
    pub fn display_name(&self) -> &'static str {
        match self {
            ClassLevel::P1 => "Primary 1",
            ClassLevel::P2 => "Primary 2",
            ClassLevel::P3 => "Primary 3",
            ClassLevel::P4 => "Primary 4",
            ClassLevel::P5 => "Primary 5",
            ClassLevel::P6 => "Primary 6",
            ClassLevel::J1 => "JHS 1",
            ClassLevel::J2 => "JHS 2",
            ClassLevel::J3 => "JHS 3",
        }
    }

    /// 解析逗号分隔的年级列表，忽略空白、重复与无法识别的项
    pub fn parse_list(raw: &str) -> Vec<ClassLevel> {
        let mut levels = Vec::new();
        for level in raw.split(',').filter_map(|s| s.trim().parse().ok()) {
            if !levels.contains(&level) {
                levels.push(level);
            }
        }
        levels
    }

    /// 序列化为逗号分隔的存储格式
    pub fn join_list(levels: &[ClassLevel]) -> String {
        levels
            .iter()
            .map(|l| l.as_str())
            .collect::<Vec<_>>()
            .join(",")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_join_list() {
        let levels = ClassLevel::parse_list("P1, J2,,X9,P1");
        assert_eq!(levels, vec![ClassLevel::P1, ClassLevel::J2]);
        assert_eq!(ClassLevel::join_list(&levels), "P1,J2");
        assert!(ClassLevel::parse_list("").is_empty());
    }

    #[test]
    fn test_from_str_rejects_unknown() {
        assert_eq!("J3".parse::<ClassLevel>(), Ok(ClassLevel::J3));
        let err = "JHS3".parse::<ClassLevel>().unwrap_err();
        assert!(err.contains("JHS3"));
    }
}
