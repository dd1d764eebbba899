/// Inputs of the field builder, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusField {
    Label,
    Required,
    DefaultValue,
    Choices,
    DisplayAlpha,
}

impl FocusField {
    const ORDER: [FocusField; 5] = [
        FocusField::Label,
        FocusField::Required,
        FocusField::DefaultValue,
        FocusField::Choices,
        FocusField::DisplayAlpha,
    ];

    pub fn step(self, delta: i32) -> Self {
        let len = Self::ORDER.len() as i32;
        let index = Self::ORDER
            .iter()
            .position(|field| *field == self)
            .unwrap_or(0) as i32;
        Self::ORDER[(index + delta).rem_euclid(len) as usize]
    }

    pub fn is_toggle(self) -> bool {
        matches!(self, FocusField::Required | FocusField::DisplayAlpha)
    }

    pub fn title(self) -> &'static str {
        match self {
            FocusField::Label => "Label",
            FocusField::Required => "Required",
            FocusField::DefaultValue => "Default Value",
            FocusField::Choices => "Choices",
            FocusField::DisplayAlpha => "Order",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stepping_wraps_both_ways() {
        assert_eq!(FocusField::Label.step(-1), FocusField::DisplayAlpha);
        assert_eq!(FocusField::DisplayAlpha.step(1), FocusField::Label);
        assert_eq!(FocusField::Required.step(2), FocusField::Choices);
    }
}
