//! User-facing flash texts

use shared::Lang;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    AddedToOrder,
    NothingToSubmit,
    CartEmpty,
    SentToKitchen,
    OrderInKitchen,
    OrderAccepted,
    OrderReady,
    TransitionRejected,
    AgeContent,
    AgeRequired,
    AgeConfirmed,
    Welcome,
    LoggedIn,
    LoggedOut,
    LoginFailed,
}

impl Message {
    pub fn text(self, lang: Lang) -> &'static str {
        use Message::*;
        match (self, lang) {
            (AddedToOrder, Lang::Ru) => "Добавлено в заказ",
            (AddedToOrder, Lang::Kk) => "Тапсырысқа қосылды",
            (AddedToOrder, Lang::En) => "Added to your order",

            (NothingToSubmit, Lang::Ru) => "Нечего оформлять",
            (NothingToSubmit, Lang::Kk) => "Рәсімдейтін ештеңе жоқ",
            (NothingToSubmit, Lang::En) => "Nothing to submit",

            (CartEmpty, Lang::Ru) => "Корзина пуста",
            (CartEmpty, Lang::Kk) => "Себет бос",
            (CartEmpty, Lang::En) => "Your cart is empty",

            (SentToKitchen, Lang::Ru) => "Заказ отправлен на кухню",
            (SentToKitchen, Lang::Kk) => "Тапсырыс асүйге жіберілді",
            (SentToKitchen, Lang::En) => "Order sent to the kitchen",

            (OrderInKitchen, Lang::Ru) => "Ваш заказ уже готовится, дождитесь его",
            (OrderInKitchen, Lang::Kk) => "Тапсырысыңыз дайындалып жатыр, күте тұрыңыз",
            (OrderInKitchen, Lang::En) => "Your order is already being prepared",

            (OrderAccepted, Lang::Ru) => "Заказ принят на кухню",
            (OrderAccepted, Lang::Kk) => "Тапсырыс асүйге қабылданды",
            (OrderAccepted, Lang::En) => "Order accepted by the kitchen",

            (OrderReady, Lang::Ru) => "Заказ готов",
            (OrderReady, Lang::Kk) => "Тапсырыс дайын",
            (OrderReady, Lang::En) => "Order is ready",

            (TransitionRejected, Lang::Ru) => "Этот статус заказа сейчас изменить нельзя",
            (TransitionRejected, Lang::Kk) => "Тапсырыс мәртебесін қазір өзгертуге болмайды",
            (TransitionRejected, Lang::En) => "This order cannot change status now",

            (AgeContent, Lang::Ru) => "Контент 21+. Подтвердите возраст.",
            (AgeContent, Lang::Kk) => "21+ мазмұны. Жасыңызды растаңыз.",
            (AgeContent, Lang::En) => "21+ content. Please confirm your age.",

            (AgeRequired, Lang::Ru) => "Нужно подтвердить 21+",
            (AgeRequired, Lang::Kk) => "21+ растау қажет",
            (AgeRequired, Lang::En) => "Age confirmation (21+) required",

            (AgeConfirmed, Lang::Ru) => "Возраст подтверждён",
            (AgeConfirmed, Lang::Kk) => "Жасыңыз расталды",
            (AgeConfirmed, Lang::En) => "Age confirmed",

            (Welcome, Lang::Ru) => "Добро пожаловать!",
            (Welcome, Lang::Kk) => "Қош келдіңіз!",
            (Welcome, Lang::En) => "Welcome!",

            (LoggedIn, Lang::Ru) => "Вы вошли",
            (LoggedIn, Lang::Kk) => "Сіз кірдіңіз",
            (LoggedIn, Lang::En) => "Signed in",

            (LoggedOut, Lang::Ru) => "Вы вышли",
            (LoggedOut, Lang::Kk) => "Сіз шықтыңыз",
            (LoggedOut, Lang::En) => "Signed out",

            (LoginFailed, Lang::Ru) => "Неверное имя пользователя или пароль",
            (LoginFailed, Lang::Kk) => "Пайдаланушы аты немесе құпия сөз қате",
            (LoginFailed, Lang::En) => "Wrong username or password",
        }
    }
}
