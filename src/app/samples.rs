use std::fmt;
use std::str::FromStr;

/// Built-in example texts the user can load into the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sample {
    /// A list of famous historical figures sharing one surname.
    HistoricalFigures,
    /// A child's account of a father who plans everything for the family.
    FamilyPlans,
}

const HISTORICAL_FIGURES: &str = "历史名人：战国时期的李冰父子主持修建了都江堰水利工程；汉代的李广抗击匈奴，威名远扬；隋代的李春是著名的桥梁专家，举世闻名的赵州桥就是他设计并参加建造的；唐代的李白被誉为“诗仙”；宋代的李清照是一位词人，有“千古第一才女”之称；明代的李时珍编写了我国古代药物学巨著《本草纲目》；近现代的李大钊是中国共产党的创始人之一……";

const FAMILY_PLANS: &str = "我爸爸是一个工厂的计划科科长，擅长订计划。在家里，他也给我们订了计划。妈妈有学习电子技术的计划，外婆有学习烹调的计划，我有作息计划、复习功课计划，他自己有读书计划、读报计划、做家务计划，每个人还有如何订计划的计划、如何督促各人执行计划的计划…… 爸爸执行计划一丝不苟。男人们在午前就出动，到亲戚家、朋友家去拜年。女人们在家中接待客人。";

impl Sample {
    /// All samples in display order
    pub const ALL: [Sample; 2] = [Sample::HistoricalFigures, Sample::FamilyPlans];

    /// The sample's text
    pub fn text(self) -> &'static str {
        match self {
            Sample::HistoricalFigures => HISTORICAL_FIGURES,
            Sample::FamilyPlans => FAMILY_PLANS,
        }
    }

    /// Button label
    pub fn label(self) -> &'static str {
        match self {
            Sample::HistoricalFigures => "加载示例一",
            Sample::FamilyPlans => "加载示例二",
        }
    }

    /// 1-based position used on the command line
    pub fn number(self) -> usize {
        match self {
            Sample::HistoricalFigures => 1,
            Sample::FamilyPlans => 2,
        }
    }
}

impl fmt::Display for Sample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

impl FromStr for Sample {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" => Ok(Sample::HistoricalFigures),
            "2" => Ok(Sample::FamilyPlans),
            other => Err(format!("Unknown example: {} (expected 1 or 2)", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_samples_parse_by_number() {
        for sample in Sample::ALL {
            assert_eq!(sample.to_string().parse::<Sample>().unwrap(), sample);
            assert!(!sample.text().trim().is_empty());
        }
        assert!("3".parse::<Sample>().is_err());
    }
}
