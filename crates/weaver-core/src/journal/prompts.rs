/// History key under which the question of the day is recorded.
pub const SPECIAL_QUESTION_KEY: &str = "special_question";

pub const SPECIAL_QUESTIONS: [&str; 20] = [
    "오늘 하루를 색으로 표현한다면 어떤 색인가요?",
    "오늘 하루가 영화라면 제목은 무엇인가요?",
    "오늘 하루를 이모지 세 개로 표현한다면 무엇인가요?",
    "오늘 기분을 음식으로 표현한다면 무엇인가요?",
    "오늘 하루가 카페라면 분위기는 어떤가요?",
    "오늘 하루를 광고 문구로 만든다면 무엇인가요?",
    "오늘 하루가 선물이라면 포장지는 어떤 모습인가요?",
    "오늘 하루를 한 컷 만화로 그린다면 어떤 장면인가요?",
    "오늘 하루에 배경음악을 깔아준다면 어떤 곡인가요?",
    "오늘 하루를 날씨로 표현한다면 어떤 날씨인가요?",
    "오늘의 나에게 상장을 준다면 어떤 상인가요?",
    "오늘 하루가 책이라면 마지막 문장은 무엇인가요?",
    "오늘 하루를 향기로 표현한다면 어떤 향인가요?",
    "오늘 하루가 계절이라면 어느 계절에 가까운가요?",
    "오늘 하루를 동물로 표현한다면 어떤 동물인가요?",
    "오늘 하루가 여행지라면 어디인가요?",
    "오늘 하루에 해시태그 세 개를 붙인다면 무엇인가요?",
    "오늘 하루가 편지라면 누구에게 보내고 싶나요?",
    "오늘 하루를 사진 한 장으로 남긴다면 무엇을 찍을까요?",
    "오늘 하루를 숫자 하나로 표현한다면 몇인가요?",
];

pub fn special_question_pool() -> Vec<String> {
    SPECIAL_QUESTIONS.iter().map(|q| q.to_string()).collect()
}
